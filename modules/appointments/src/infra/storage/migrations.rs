use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250115_000001_create_appointments::Migration)]
    }
}

mod m20250115_000001_create_appointments {
    use sea_orm_migration::prelude::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Appointments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Appointments::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Appointments::Title).string().not_null())
                        .col(
                            ColumnDef::new(Appointments::StartAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appointments::EndAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Appointments::Platform).string().not_null())
                        .col(ColumnDef::new(Appointments::ServiceId).string())
                        .col(ColumnDef::new(Appointments::PatientName).string())
                        .col(ColumnDef::new(Appointments::PatientEmail).string())
                        .col(ColumnDef::new(Appointments::PatientPhone).string())
                        .col(ColumnDef::new(Appointments::TherapistId).string())
                        .col(ColumnDef::new(Appointments::TherapistName).string())
                        .col(
                            ColumnDef::new(Appointments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appointments::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Overlap probes filter on both bounds.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_appointments_start_at")
                        .table(Appointments::Table)
                        .col(Appointments::StartAt)
                        .to_owned(),
                )
                .await?;
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_appointments_end_at")
                        .table(Appointments::Table)
                        .col(Appointments::EndAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Appointments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Appointments {
        Table,
        Id,
        Title,
        StartAt,
        EndAt,
        Platform,
        ServiceId,
        PatientName,
        PatientEmail,
        PatientPhone,
        TherapistId,
        TherapistName,
        CreatedAt,
        UpdatedAt,
    }
}
