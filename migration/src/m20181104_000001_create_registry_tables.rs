use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== MEASURE TYPES ==========
        manager
            .create_table(
                Table::create()
                    .table(MeasureTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeasureTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MeasureTypes::Suffix).string_len(16).not_null())
                    .col(
                        ColumnDef::new(MeasureTypes::MeasureType)
                            .string_len(64)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== USERS ==========
        // Rows are owned by the identity provider; only the display name is read here.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::UserName).string_len(256).not_null())
                    .col(ColumnDef::new(Users::Email).string_len(256))
                    .to_owned(),
            )
            .await?;

        // ========== SENSORS ==========
        manager
            .create_table(
                Table::create()
                    .table(Sensors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sensors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sensors::ExternalId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Sensors::Description).text().not_null())
                    .col(ColumnDef::new(Sensors::Tag).string_len(128).not_null())
                    .col(ColumnDef::new(Sensors::Url).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Sensors::PollingInterval)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(ColumnDef::new(Sensors::MinValue).double().not_null())
                    .col(ColumnDef::new(Sensors::MaxValue).double().not_null())
                    .col(ColumnDef::new(Sensors::Value).double().not_null().default(0.0))
                    .col(ColumnDef::new(Sensors::TimeStamp).timestamp_with_time_zone())
                    .col(ColumnDef::new(Sensors::ModifiedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(Sensors::MeasureTypeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sensors_measure_type")
                            .from(Sensors::Table, Sensors::MeasureTypeId)
                            .to(MeasureTypes::Table, MeasureTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== USER SENSORS ==========
        manager
            .create_table(
                Table::create()
                    .table(UserSensors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSensors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserSensors::UserId).string_len(64).not_null())
                    .col(ColumnDef::new(UserSensors::SensorId).integer().not_null())
                    .col(ColumnDef::new(UserSensors::Name).string_len(20).not_null())
                    .col(
                        ColumnDef::new(UserSensors::Description)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserSensors::MinValue).double().not_null())
                    .col(ColumnDef::new(UserSensors::MaxValue).double().not_null())
                    .col(
                        ColumnDef::new(UserSensors::PollingInterval)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserSensors::Latitude).double().not_null())
                    .col(ColumnDef::new(UserSensors::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(UserSensors::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserSensors::Alarm)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(UserSensors::ImageUrl).string_len(512).not_null())
                    .col(
                        ColumnDef::new(UserSensors::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_sensors_user")
                            .from(UserSensors::Table, UserSensors::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_sensors_sensor")
                            .from(UserSensors::Table, UserSensors::SensorId)
                            .to(Sensors::Table, Sensors::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_sensors_user_id")
                    .table(UserSensors::Table)
                    .col(UserSensors::UserId)
                    .to_owned(),
            )
            .await?;

        // Every read path filters on these two flags
        manager
            .create_index(
                Index::create()
                    .name("idx_user_sensors_visibility")
                    .table(UserSensors::Table)
                    .col(UserSensors::IsDeleted)
                    .col(UserSensors::IsPublic)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(UserSensors::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Sensors::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(MeasureTypes::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MeasureTypes {
    Table,
    Id,
    Suffix,
    MeasureType,
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    UserName,
    Email,
}

#[derive(DeriveIden)]
pub enum Sensors {
    Table,
    Id,
    ExternalId,
    Description,
    Tag,
    Url,
    PollingInterval,
    MinValue,
    MaxValue,
    Value,
    TimeStamp,
    ModifiedOn,
    MeasureTypeId,
}

#[derive(DeriveIden)]
pub enum UserSensors {
    Table,
    Id,
    UserId,
    SensorId,
    Name,
    Description,
    MinValue,
    MaxValue,
    PollingInterval,
    Latitude,
    Longitude,
    IsPublic,
    Alarm,
    ImageUrl,
    IsDeleted,
}
