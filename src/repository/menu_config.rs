use chrono::Local;
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::menu_config::MenuConfig as DomainMenuConfig,
    models::encode_document,
    models::menu_config::{MenuConfig as DbMenuConfig, NewMenuConfig},
    repository::{DieselRepository, MenuConfigReader, MenuConfigWriter},
};

impl MenuConfigReader for DieselRepository {
    fn get_menu_config(&self, hub_id: i32) -> RepositoryResult<DomainMenuConfig> {
        use crate::schema::menu_configs;

        let mut conn = self.conn()?;

        let row = menu_configs::table
            .filter(menu_configs::hub_id.eq(hub_id))
            .first::<DbMenuConfig>(&mut conn)
            .optional()?;

        match row {
            Some(row) => row.try_into(),
            None => Ok(DomainMenuConfig::default()),
        }
    }
}

impl MenuConfigWriter for DieselRepository {
    fn save_menu_config(
        &self,
        hub_id: i32,
        config: &DomainMenuConfig,
    ) -> RepositoryResult<DomainMenuConfig> {
        use crate::schema::menu_configs;

        let document = encode_document(config)?;
        let now = Local::now().naive_utc();

        let mut conn = self.conn()?;

        conn.transaction::<DomainMenuConfig, RepositoryError, _>(|conn| {
            let target = menu_configs::table.filter(menu_configs::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set((
                    menu_configs::document.eq(&document),
                    menu_configs::updated_at.eq(now),
                ))
                .execute(conn)?;

            if updated == 0 {
                diesel::insert_into(menu_configs::table)
                    .values(&NewMenuConfig {
                        hub_id,
                        document: document.clone(),
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            menu_configs::table
                .filter(menu_configs::hub_id.eq(hub_id))
                .first::<DbMenuConfig>(conn)?
                .try_into()
        })
    }
}
