use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_categories;
mod m20240101_000003_create_products;
mod m20240101_000004_create_posts;
mod m20240101_000005_create_orders;
mod m20240101_000006_create_order_items;
mod m20240101_000007_add_list_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_categories::Migration),
            Box::new(m20240101_000003_create_products::Migration),
            Box::new(m20240101_000004_create_posts::Migration),
            Box::new(m20240101_000005_create_orders::Migration),
            Box::new(m20240101_000006_create_order_items::Migration),
            Box::new(m20240101_000007_add_list_indexes::Migration),
        ]
    }
}

/// CHECK expression restricting a varchar column to an enum's wire names.
pub(crate) fn one_of<C, I>(column: C, values: I) -> SimpleExpr
where
    C: IntoColumnRef,
    I: IntoIterator<Item = &'static str>,
{
    Expr::col(column).is_in(values)
}
