pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_accounts_table;
mod m20240101_000002_create_positions_table;
mod m20240101_000003_create_members_table;
mod m20240101_000004_create_register_faces_table;
mod m20240101_000005_create_enter_history_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_accounts_table::Migration),
            Box::new(m20240101_000002_create_positions_table::Migration),
            Box::new(m20240101_000003_create_members_table::Migration),
            Box::new(m20240101_000004_create_register_faces_table::Migration),
            Box::new(m20240101_000005_create_enter_history_table::Migration),
        ]
    }
}
