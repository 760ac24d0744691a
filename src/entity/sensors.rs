use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical sensor. Rows are written by the ingestion side and only read here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sensors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub external_id: String,
    pub description: String,
    pub tag: String,
    pub url: String,
    pub polling_interval: i32,
    pub min_value: f64,
    pub max_value: f64,
    pub value: f64,
    pub time_stamp: Option<DateTimeWithTimeZone>,
    pub modified_on: Option<DateTimeWithTimeZone>,
    pub measure_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::measure_types::Entity",
        from = "Column::MeasureTypeId",
        to = "super::measure_types::Column::Id"
    )]
    MeasureType,
    #[sea_orm(has_many = "super::user_sensors::Entity")]
    UserSensors,
}

impl Related<super::measure_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MeasureType.def()
    }
}

impl Related<super::user_sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSensors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
