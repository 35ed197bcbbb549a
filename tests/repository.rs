use pushkind_common::repository::errors::RepositoryError;

use cozinha_afeto::domain::customer::{CustomerListQuery, CustomerProfile, NewCustomer, UpdateCustomer};
use cozinha_afeto::domain::menu_config::MenuConfig;
use cozinha_afeto::domain::order::{NewOrder, OrderItem, OrderListQuery, OrderStatus, UpdateOrder};
use cozinha_afeto::domain::registration_token::NewRegistrationToken;
use cozinha_afeto::domain::waste::{NewWasteRecord, WasteItem, WasteListQuery};
use cozinha_afeto::repository::{
    CustomerReader, CustomerWriter, DieselRepository, MenuConfigReader, MenuConfigWriter,
    OrderReader, OrderWriter, RegistrationTokenReader, RegistrationTokenWriter, WasteReader,
    WasteWriter,
};

mod common;

fn profile(name: &str) -> CustomerProfile {
    CustomerProfile {
        name: name.to_string(),
        category: Some("escola".to_string()),
        email: Some("contato@escola.com.br".to_string()),
        phone: None,
        document: None,
        billing_address: None,
    }
}

fn item(recipe_id: i32, quantity: f64, unit_price: f64) -> OrderItem {
    OrderItem {
        recipe_id,
        recipe_name: format!("Receita {recipe_id}"),
        quantity,
        unit_price: Some(unit_price),
        ..OrderItem::default()
    }
}

#[test]
fn test_customer_repository_is_hub_scoped() {
    let test_db = common::TestDb::new("test_customer_repository_is_hub_scoped.db");
    let repo = DieselRepository::new(test_db.pool());

    let escola = repo
        .create_customer(&NewCustomer::new(1, "Escola Sol"))
        .unwrap();
    repo.create_customer(&NewCustomer::new(2, "Outra cozinha"))
        .unwrap();

    let (total, customers) = repo.list_customers(CustomerListQuery::new(1)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(customers[0].name, "Escola Sol");

    assert!(repo.get_customer_by_id(escola.id, 2).unwrap().is_none());
    let by_public_id = repo
        .find_customer_by_public_id(&escola.public_id)
        .unwrap()
        .unwrap();
    assert_eq!(by_public_id.id, escola.id);
    assert!(
        repo.find_customer_by_public_id(&escola.id.to_string())
            .unwrap()
            .is_none()
    );

    let err = repo
        .update_customer(escola.id, 2, &UpdateCustomer::new(profile("Intrusa")))
        .expect_err("expected hub-scoped update to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_registration_completes_only_once() {
    let test_db = common::TestDb::new("test_registration_completes_only_once.db");
    let repo = DieselRepository::new(test_db.pool());

    let pending = repo
        .create_customer(&NewCustomer::pending(1, "Empresa Lua"))
        .unwrap();
    assert!(pending.pending_registration);

    let (pending_total, _) = repo
        .list_customers(CustomerListQuery::new(1).pending_only())
        .unwrap();
    assert_eq!(pending_total, 1);

    let updates = UpdateCustomer::new(profile("Empresa Lua Ltda")).complete_registration();
    let registered = repo.update_customer(pending.id, 1, &updates).unwrap();
    assert!(!registered.pending_registration);
    assert_eq!(registered.name, "Empresa Lua Ltda");

    let err = repo
        .update_customer(pending.id, 1, &updates)
        .expect_err("second completion must not match");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_registration_token_is_redeemed_once() {
    let test_db = common::TestDb::new("test_registration_token_is_redeemed_once.db");
    let repo = DieselRepository::new(test_db.pool());

    let issued = repo
        .create_registration_token(&NewRegistrationToken::issue(1))
        .unwrap();
    assert!(!issued.is_redeemed());
    assert!(
        repo.get_registration_token(2, &issued.token)
            .unwrap()
            .is_none()
    );

    let customer = repo
        .redeem_registration_token(1, &issued.token, &NewCustomer::new(1, "Creche Mar"))
        .unwrap();

    let redeemed = repo
        .get_registration_token(1, &issued.token)
        .unwrap()
        .unwrap();
    assert!(redeemed.is_redeemed());
    assert_eq!(redeemed.customer_id, Some(customer.id));

    let err = repo
        .redeem_registration_token(1, &issued.token, &NewCustomer::new(1, "Creche Mar"))
        .expect_err("second redemption must not match");
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repo
        .redeem_registration_token(1, "never-issued", &NewCustomer::new(1, "Intrusa"))
        .expect_err("unissued token must not match");
    assert!(matches!(err, RepositoryError::NotFound));

    // Failed redemptions leave no customer behind.
    let (total, _) = repo.list_customers(CustomerListQuery::new(1)).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_order_repository_crud() {
    let test_db = common::TestDb::new("test_order_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let customer = repo
        .create_customer(&NewCustomer::new(1, "Escola Sol"))
        .unwrap();

    let monday = repo
        .create_order(&NewOrder::new(
            1,
            customer.id,
            10,
            2025,
            1,
            vec![item(7, 2.0, 5.0), item(8, 3.0, 4.0)],
        ))
        .unwrap();
    assert_eq!(monday.total_items, 5.0);
    assert_eq!(monday.total_amount, 22.0);
    assert_eq!(monday.items.len(), 2);

    repo.create_order(&NewOrder::new(1, customer.id, 11, 2025, 2, vec![item(7, 1.0, 5.0)]))
        .unwrap();

    let (total, orders) = repo
        .list_orders(OrderListQuery::new(1).week(10, 2025))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(orders[0].id, monday.id);

    let confirmed = repo
        .update_order(
            monday.id,
            1,
            &UpdateOrder::new()
                .items(vec![item(7, 4.0, 5.0)])
                .status(OrderStatus::Confirmed),
        )
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert_eq!(confirmed.total_amount, 20.0);

    let err = repo
        .delete_order(monday.id, 2)
        .expect_err("expected hub-scoped delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_order(monday.id, 1).unwrap();
    assert!(repo.get_order_by_id(monday.id, 1).unwrap().is_none());
}

#[test]
fn test_waste_record_is_replaced_for_same_day() {
    let test_db = common::TestDb::new("test_waste_record_is_replaced_for_same_day.db");
    let repo = DieselRepository::new(test_db.pool());

    let customer = repo
        .create_customer(&NewCustomer::new(1, "Escola Sol"))
        .unwrap();
    let returned = |quantity: f64| WasteItem {
        recipe_id: 7,
        waste_quantity: 1.0,
        client_returned_quantity: quantity,
        ..WasteItem::default()
    };

    let first = repo
        .save_waste_record(&NewWasteRecord::new(1, customer.id, 10, 2025, 1, vec![returned(1.0)]))
        .unwrap();
    let second = repo
        .save_waste_record(
            &NewWasteRecord::new(1, customer.id, 10, 2025, 1, vec![returned(3.0)])
                .with_notes("sobrou arroz"),
        )
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.notes.as_deref(), Some("sobrou arroz"));

    let records = repo
        .list_waste_records(WasteListQuery::new(1).customer_id(customer.id).week(10, 2025))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].items[0].client_returned_quantity, 3.0);
}

#[test]
fn test_menu_config_defaults_then_persists() {
    let test_db = common::TestDb::new("test_menu_config_defaults_then_persists.db");
    let repo = DieselRepository::new(test_db.pool());

    assert_eq!(repo.get_menu_config(1).unwrap(), MenuConfig::default());

    let mut config = MenuConfig::default();
    config.active_categories.insert(3, false);
    config.category_colors.insert(4, "#ff8800".to_string());
    config.available_days = vec![1, 3];

    repo.save_menu_config(1, &config).unwrap();
    config.available_days = vec![2];
    repo.save_menu_config(1, &config).unwrap();

    let stored = repo.get_menu_config(1).unwrap();
    assert_eq!(stored, config);
    assert_eq!(repo.get_menu_config(2).unwrap(), MenuConfig::default());
}
