use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegisterFaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RegisterFaces::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RegisterFaces::MemberId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegisterFaces::FaceImage)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RegisterFaces::FaceImageProcess).string_len(500))
                    .col(ColumnDef::new(RegisterFaces::ImageVector).text().not_null())
                    .col(ColumnDef::new(RegisterFaces::ImageVectorProcess).text())
                    .col(
                        ColumnDef::new(RegisterFaces::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_register_faces_member_id")
                            .from(RegisterFaces::Table, RegisterFaces::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .name("idx_register_faces_member_id")
                    .table(RegisterFaces::Table)
                    .col(RegisterFaces::MemberId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegisterFaces::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RegisterFaces {
    #[sea_orm(iden = "tbl_register_faces")]
    Table,
    Id,
    MemberId,
    FaceImage,
    FaceImageProcess,
    ImageVector,
    ImageVectorProcess,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Members {
    #[sea_orm(iden = "tbl_member")]
    Table,
    Id,
}
