use mockall::mock;

use super::{
    CategoryReader, CategoryTypeReader, CategoryTypeWriter, CategoryWriter, CustomerReader,
    CustomerWriter, IngredientReader, IngredientWriter, MenuConfigReader, MenuConfigWriter,
    OrderReader, OrderWriter, RecipeReader, RecipeWriter, RegistrationTokenReader,
    RegistrationTokenWriter, UserReader, UserWriter, WasteReader, WasteWriter,
};
use crate::domain::{
    category::{
        Category, CategoryListQuery, CategoryType, NewCategory, NewCategoryType, UpdateCategory,
    },
    customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer},
    ingredient::{Ingredient, IngredientListQuery, NewIngredient, UpdateIngredient},
    menu_config::MenuConfig,
    order::{NewOrder, Order, OrderListQuery, UpdateOrder},
    recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe},
    registration_token::{NewRegistrationToken, RegistrationToken},
    user::{NewUser, UpdateUser, User},
    waste::{NewWasteRecord, WasteListQuery, WasteRecord},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, hub_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryTypeReader {}

    impl CategoryTypeReader for CategoryTypeReader {
        fn list_category_types(&self, hub_id: i32) -> RepositoryResult<Vec<CategoryType>>;
    }
}

mock! {
    pub CategoryTypeWriter {}

    impl CategoryTypeWriter for CategoryTypeWriter {
        fn create_category_type(&self, new_type: &NewCategoryType) -> RepositoryResult<CategoryType>;
        fn update_category_type(&self, type_id: i32, hub_id: i32, updates: &NewCategoryType) -> RepositoryResult<CategoryType>;
    }
}

mock! {
    pub IngredientReader {}

    impl IngredientReader for IngredientReader {
        fn get_ingredient_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Ingredient>>;
        fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<(usize, Vec<Ingredient>)>;
    }
}

mock! {
    pub IngredientWriter {}

    impl IngredientWriter for IngredientWriter {
        fn create_ingredient(&self, new_ingredient: &NewIngredient) -> RepositoryResult<Ingredient>;
        fn update_ingredient(&self, ingredient_id: i32, hub_id: i32, updates: &UpdateIngredient) -> RepositoryResult<Ingredient>;
        fn delete_ingredient(&self, ingredient_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub RecipeReader {}

    impl RecipeReader for RecipeReader {
        fn get_recipe_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Recipe>>;
        fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
    }
}

mock! {
    pub RecipeWriter {}

    impl RecipeWriter for RecipeWriter {
        fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
        fn update_recipe(&self, recipe_id: i32, hub_id: i32, updates: &UpdateRecipe) -> RepositoryResult<Recipe>;
        fn delete_recipe(&self, recipe_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CustomerReader {}

    impl CustomerReader for CustomerReader {
        fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
        fn find_customer_by_public_id(&self, public_id: &str) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }
}

mock! {
    pub CustomerWriter {}

    impl CustomerWriter for CustomerWriter {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer_id: i32, hub_id: i32, updates: &UpdateCustomer) -> RepositoryResult<Customer>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order(&self, order_id: i32, hub_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
        fn delete_order(&self, order_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub WasteReader {}

    impl WasteReader for WasteReader {
        fn list_waste_records(&self, query: WasteListQuery) -> RepositoryResult<Vec<WasteRecord>>;
    }
}

mock! {
    pub WasteWriter {}

    impl WasteWriter for WasteWriter {
        fn save_waste_record(&self, record: &NewWasteRecord) -> RepositoryResult<WasteRecord>;
    }
}

mock! {
    pub MenuConfigReader {}

    impl MenuConfigReader for MenuConfigReader {
        fn get_menu_config(&self, hub_id: i32) -> RepositoryResult<MenuConfig>;
    }
}

mock! {
    pub MenuConfigWriter {}

    impl MenuConfigWriter for MenuConfigWriter {
        fn save_menu_config(&self, hub_id: i32, config: &MenuConfig) -> RepositoryResult<MenuConfig>;
    }
}

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, hub_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    }
}

// Stand-in for `DieselRepository` in services that combine several readers
// and writers.
mock! {
    pub KitchenRepository {}

    impl CategoryReader for KitchenRepository {
        fn get_category_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    }

    impl CategoryWriter for KitchenRepository {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, hub_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl CategoryTypeReader for KitchenRepository {
        fn list_category_types(&self, hub_id: i32) -> RepositoryResult<Vec<CategoryType>>;
    }

    impl CategoryTypeWriter for KitchenRepository {
        fn create_category_type(&self, new_type: &NewCategoryType) -> RepositoryResult<CategoryType>;
        fn update_category_type(&self, type_id: i32, hub_id: i32, updates: &NewCategoryType) -> RepositoryResult<CategoryType>;
    }

    impl CustomerReader for KitchenRepository {
        fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
        fn find_customer_by_public_id(&self, public_id: &str) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for KitchenRepository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer_id: i32, hub_id: i32, updates: &UpdateCustomer) -> RepositoryResult<Customer>;
    }

    impl RegistrationTokenReader for KitchenRepository {
        fn get_registration_token(&self, hub_id: i32, token: &str) -> RepositoryResult<Option<RegistrationToken>>;
    }

    impl RegistrationTokenWriter for KitchenRepository {
        fn create_registration_token(&self, new_token: &NewRegistrationToken) -> RepositoryResult<RegistrationToken>;
        fn redeem_registration_token(&self, hub_id: i32, token: &str, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    }

    impl MenuConfigReader for KitchenRepository {
        fn get_menu_config(&self, hub_id: i32) -> RepositoryResult<MenuConfig>;
    }

    impl MenuConfigWriter for KitchenRepository {
        fn save_menu_config(&self, hub_id: i32, config: &MenuConfig) -> RepositoryResult<MenuConfig>;
    }

    impl OrderReader for KitchenRepository {
        fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderWriter for KitchenRepository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order(&self, order_id: i32, hub_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
        fn delete_order(&self, order_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl RecipeReader for KitchenRepository {
        fn get_recipe_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Recipe>>;
        fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
    }

    impl RecipeWriter for KitchenRepository {
        fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
        fn update_recipe(&self, recipe_id: i32, hub_id: i32, updates: &UpdateRecipe) -> RepositoryResult<Recipe>;
        fn delete_recipe(&self, recipe_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl IngredientReader for KitchenRepository {
        fn get_ingredient_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Ingredient>>;
        fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<(usize, Vec<Ingredient>)>;
    }

    impl IngredientWriter for KitchenRepository {
        fn create_ingredient(&self, new_ingredient: &NewIngredient) -> RepositoryResult<Ingredient>;
        fn update_ingredient(&self, ingredient_id: i32, hub_id: i32, updates: &UpdateIngredient) -> RepositoryResult<Ingredient>;
        fn delete_ingredient(&self, ingredient_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl UserReader for KitchenRepository {
        fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for KitchenRepository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, hub_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    }

    impl WasteReader for KitchenRepository {
        fn list_waste_records(&self, query: WasteListQuery) -> RepositoryResult<Vec<WasteRecord>>;
    }

    impl WasteWriter for KitchenRepository {
        fn save_waste_record(&self, record: &NewWasteRecord) -> RepositoryResult<WasteRecord>;
    }
}
