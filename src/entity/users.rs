use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dormitory resident, as mirrored from the identity provider.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_name: String,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_sensors::Entity")]
    UserSensors,
}

impl Related<super::user_sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSensors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
