use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user's subscription to a physical sensor, with its own alarm bounds.
///
/// Rows are soft-deleted through `is_deleted` and never removed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_sensors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub sensor_id: i32,
    pub name: String,
    pub description: String,
    pub min_value: f64,
    pub max_value: f64,
    pub polling_interval: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub is_public: bool,
    pub alarm: bool,
    pub image_url: String,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::sensors::Entity",
        from = "Column::SensorId",
        to = "super::sensors::Column::Id"
    )]
    Sensor,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sensor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
