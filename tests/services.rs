use chrono::NaiveDate;
use pushkind_common::domain::auth::AuthenticatedUser;

use cozinha_afeto::domain::customer::{CustomerListQuery, NewCustomer};
use cozinha_afeto::domain::order::{OrderStatus, UpdateOrder};
use cozinha_afeto::domain::quantity::QuantityValue;
use cozinha_afeto::domain::recipe::{NewRecipe, UpdateRecipe};
use cozinha_afeto::forms::customers::{InviteCustomerForm, RegistrationForm};
use cozinha_afeto::forms::orders::{
    OrderItemForm, PortalOrderForm, PortalOrderItemForm, SaveOrderForm,
};
use cozinha_afeto::forms::waste::{SaveWasteForm, WasteItemForm};
use cozinha_afeto::repository::{
    CustomerReader, CustomerWriter, DieselRepository, OrderWriter, RecipeWriter,
};
use cozinha_afeto::services::orders;
use cozinha_afeto::services::portal::{self, PortalView};
use cozinha_afeto::services::reports::{self, BillingQuery};
use cozinha_afeto::services::waste;
use cozinha_afeto::{SERVICE_ACCESS_ROLE, services::ServiceError};

mod common;

fn staff(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "staff".into(),
        email: "cozinha@afeto.com.br".into(),
        hub_id: 1,
        name: "Equipe".into(),
        roles: roles.iter().map(|role| role.to_string()).collect(),
        exp: 0,
    }
}

fn registration(name: &str) -> RegistrationForm {
    RegistrationForm {
        name: name.to_string(),
        category: Some("escola".to_string()),
        email: "compras@escola.com.br".to_string(),
        phone: Some("(11) 99999-0000".to_string()),
        document: None,
        billing_address: None,
    }
}

fn monday_order(recipe_id: i32, quantity: f64) -> PortalOrderForm {
    PortalOrderForm {
        week_number: 10,
        year: 2025,
        day_of_week: 1,
        items: vec![PortalOrderItemForm {
            unique_id: Some("linha-1".to_string()),
            recipe_id,
            quantity: QuantityValue::from(quantity),
            unit_type: Some("cuba".to_string()),
            notes: None,
        }],
        total_meals_expected: Some(40),
        general_notes: None,
    }
}

fn grid_line(recipe_id: i32, quantity: &str) -> OrderItemForm {
    OrderItemForm {
        unique_id: None,
        recipe_id,
        recipe_name: None,
        quantity: QuantityValue::from(quantity),
        unit_type: Some("cuba".to_string()),
        unit_price: None,
        notes: None,
    }
}

#[test]
fn invited_customer_registers_orders_and_is_billed() {
    let test_db = common::TestDb::new("service_invited_customer_registers.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = staff(&[SERVICE_ACCESS_ROLE]);

    let recipe = repo
        .create_recipe(&NewRecipe::new(1, "Arroz integral", vec![]).with_sale_price(12.5))
        .expect("create recipe");

    let link = portal::create_registration_link(
        &repo,
        &user,
        InviteCustomerForm {
            name: Some("Escola Sol".to_string()),
        },
        "https://portal.afeto.test/",
    )
    .expect("create link");
    assert_eq!(
        link.url,
        format!("https://portal.afeto.test/portal/{}", link.reference)
    );

    let view = portal::load_portal(&repo, &link.reference).expect("load portal");
    assert!(matches!(view, PortalView::RegistrationRequired { .. }));

    let early = portal::save_portal_order(&repo, &link.reference, monday_order(recipe.id, 2.0));
    assert!(matches!(early, Err(ServiceError::Unauthorized)));

    let customer = portal::complete_registration(&repo, &link.reference, registration("Escola Sol"))
        .expect("complete registration");
    assert!(!customer.pending_registration);
    assert_eq!(customer.email.as_deref(), Some("compras@escola.com.br"));

    let again = portal::complete_registration(&repo, &link.reference, registration("Escola Sol"));
    assert!(matches!(again, Err(ServiceError::Conflict)));

    let view = portal::load_portal(&repo, &link.reference).expect("load portal");
    let PortalView::Menu(menu) = view else {
        panic!("registered customer should see the menu");
    };
    assert_eq!(menu.recipes.len(), 1);

    let order = portal::save_portal_order(&repo, &link.reference, monday_order(recipe.id, 2.0))
        .expect("save portal order");
    assert_eq!(order.total_amount, 25.0);
    assert_eq!(order.items[0].unit_price, Some(12.5));

    waste::save_waste_record(
        &repo,
        &user,
        SaveWasteForm {
            customer_id: customer.id,
            week_number: 10,
            year: 2025,
            day_of_week: 1,
            items: vec![WasteItemForm {
                unique_id: Some("linha-1".to_string()),
                recipe_id: recipe.id,
                waste_quantity: QuantityValue::from(0.5),
                client_returned_quantity: QuantityValue::from(2.0),
                ordered_unit_type: Some("cuba".to_string()),
            }],
            notes: None,
        },
    )
    .expect("save waste");

    let settlement = waste::load_order_settlement(&repo, &user, order.id).expect("settlement");
    assert_eq!(settlement.depreciation.total_depreciation, 6.25);
    assert_eq!(settlement.depreciation.final_value, 18.75);

    let today = NaiveDate::from_ymd_opt(2025, 3, 5).expect("valid date");
    let billing = reports::load_weekly_billing(
        &repo,
        &user,
        BillingQuery {
            week: Some(10),
            year: Some(2025),
        },
        today,
    )
    .expect("billing");
    assert_eq!(billing.rows.len(), 1);
    assert_eq!(billing.rows[0].customer_name, "Escola Sol");
    assert_eq!(billing.gross, 25.0);
    assert_eq!(billing.net, 18.75);
}

#[test]
fn portal_cannot_change_confirmed_order() {
    let test_db = common::TestDb::new("service_portal_confirmed_order.db");
    let repo = DieselRepository::new(test_db.pool());

    let recipe = repo
        .create_recipe(&NewRecipe::new(1, "Feijão", vec![]).with_sale_price(10.0))
        .expect("create recipe");
    let customer = repo
        .create_customer(&NewCustomer::new(1, "Empresa Lua"))
        .expect("create customer");
    let reference = customer.public_id.clone();

    let order = portal::save_portal_order(&repo, &reference, monday_order(recipe.id, 1.0))
        .expect("first order");
    repo.update_order(order.id, 1, &UpdateOrder::new().status(OrderStatus::Confirmed))
        .expect("confirm order");

    let result = portal::save_portal_order(&repo, &reference, monday_order(recipe.id, 3.0));
    assert!(matches!(result, Err(ServiceError::Conflict)));
}

#[test]
fn portal_does_not_accept_internal_customer_id() {
    let test_db = common::TestDb::new("service_portal_internal_id.db");
    let repo = DieselRepository::new(test_db.pool());

    let recipe = repo
        .create_recipe(&NewRecipe::new(1, "Feijão", vec![]).with_sale_price(10.0))
        .expect("create recipe");
    let customer = repo
        .create_customer(&NewCustomer::new(1, "Empresa Lua"))
        .expect("create customer");
    assert_ne!(customer.public_id, customer.id.to_string());

    let reference = customer.id.to_string();
    assert!(matches!(
        portal::load_portal(&repo, &reference),
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        portal::save_portal_order(&repo, &reference, monday_order(recipe.id, 1.0)),
        Err(ServiceError::NotFound)
    ));

    let view = portal::load_portal(&repo, &customer.public_id).expect("load portal");
    assert!(matches!(view, PortalView::Menu(_)));
}

#[test]
fn temporary_link_creates_customer_once() {
    let test_db = common::TestDb::new("service_temporary_link_registration.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = staff(&[SERVICE_ACCESS_ROLE]);

    let link = portal::create_registration_link(
        &repo,
        &user,
        InviteCustomerForm { name: None },
        "https://portal.afeto.test",
    )
    .expect("create link");
    assert!(link.reference.starts_with("temp-1-"));
    assert!(link.customer.is_none());

    let view = portal::load_portal(&repo, &link.reference).expect("load portal");
    assert!(matches!(view, PortalView::RegistrationRequired { customer: None, .. }));

    let customer = portal::complete_registration(&repo, &link.reference, registration("Creche Mar"))
        .expect("register");
    assert_eq!(customer.hub_id, 1);
    assert!(!customer.pending_registration);

    let again = portal::complete_registration(&repo, &link.reference, registration("Creche Mar"));
    assert!(matches!(again, Err(ServiceError::Conflict)));
    assert!(matches!(
        portal::load_portal(&repo, &link.reference),
        Err(ServiceError::NotFound)
    ));

    let view = portal::load_portal(&repo, &customer.public_id).expect("load portal");
    assert!(matches!(view, PortalView::Menu(_)));

    let (total, _) = repo
        .list_customers(CustomerListQuery::new(1))
        .expect("list customers");
    assert_eq!(total, 1);
}

#[test]
fn unissued_registration_token_is_rejected() {
    let test_db = common::TestDb::new("service_unissued_registration_token.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = staff(&[SERVICE_ACCESS_ROLE]);

    let forged = portal::complete_registration(&repo, "temp-42-never-issued", registration("Intrusa"));
    assert!(matches!(forged, Err(ServiceError::NotFound)));

    // An issued token only works for the hub it was issued for.
    let link = portal::create_registration_link(
        &repo,
        &user,
        InviteCustomerForm { name: None },
        "https://portal.afeto.test",
    )
    .expect("create link");
    let token = link.reference.trim_start_matches("temp-1-");
    let other_hub = format!("temp-2-{token}");
    assert!(matches!(
        portal::complete_registration(&repo, &other_hub, registration("Intrusa")),
        Err(ServiceError::NotFound)
    ));

    for hub_id in [1, 2, 42] {
        let (total, _) = repo
            .list_customers(CustomerListQuery::new(hub_id))
            .expect("list customers");
        assert_eq!(total, 0);
    }
}

#[test]
fn staff_resave_keeps_lines_of_deactivated_recipe() {
    let test_db = common::TestDb::new("service_resave_deactivated_recipe.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = staff(&[SERVICE_ACCESS_ROLE]);

    let arroz = repo
        .create_recipe(&NewRecipe::new(1, "Arroz integral", vec![]).with_sale_price(12.5))
        .expect("create recipe");
    let feijao = repo
        .create_recipe(&NewRecipe::new(1, "Feijão", vec![]).with_sale_price(10.0))
        .expect("create recipe");
    let customer = repo
        .create_customer(&NewCustomer::new(1, "Escola Sol"))
        .expect("create customer");

    let grid = |notes: Option<&str>| SaveOrderForm {
        customer_id: customer.id,
        week_number: 10,
        year: 2025,
        day_of_week: 1,
        items: vec![grid_line(arroz.id, "2"), grid_line(feijao.id, "1")],
        total_meals_expected: None,
        general_notes: notes.map(str::to_string),
        status: None,
    };

    let first = orders::save_order(&repo, &user, grid(None)).expect("first save");
    assert_eq!(first.total_amount, 35.0);

    let mut deactivated = UpdateRecipe::from(NewRecipe::new(1, "Feijão", vec![]).with_sale_price(10.0));
    deactivated.is_active = false;
    repo.update_recipe(feijao.id, 1, &deactivated)
        .expect("deactivate recipe");

    let resaved = orders::save_order(&repo, &user, grid(Some("entregar cedo"))).expect("re-save");
    assert_eq!(resaved.id, first.id);
    assert_eq!(resaved.items.len(), 2);
    assert_eq!(resaved.items[1].recipe_name, "Feijão");
    assert_eq!(resaved.total_amount, 35.0);
    assert_eq!(resaved.general_notes.as_deref(), Some("entregar cedo"));

    let mut unknown = grid(None);
    unknown.items.push(grid_line(9_999, "1"));
    assert!(matches!(
        orders::save_order(&repo, &user, unknown),
        Err(ServiceError::Form(_))
    ));
}

#[test]
fn billing_requires_service_role() {
    let test_db = common::TestDb::new("service_billing_requires_role.db");
    let repo = DieselRepository::new(test_db.pool());
    let today = NaiveDate::from_ymd_opt(2025, 3, 5).expect("valid date");

    let result = reports::load_weekly_billing(
        &repo,
        &staff(&["user"]),
        BillingQuery::default(),
        today,
    );
    assert!(matches!(result, Err(ServiceError::Unauthorized)));
}
