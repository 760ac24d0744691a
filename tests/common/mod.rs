//! Shared fixtures: an in-memory SQLite store with the schema migrated, and
//! helpers to seed the rows the registry reads but never writes.

#![allow(dead_code)]

use dorm_sensors::entity::{measure_types, sensors, users};
use dorm_sensors::registry::{NewUserSensor, UserSensorRegistry};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

pub async fn setup() -> (DatabaseConnection, UserSensorRegistry) {
    // A single connection keeps every query on the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("connect to sqlite");
    migration::Migrator::up(&db, None)
        .await
        .expect("run migrations");

    let registry = UserSensorRegistry::new(db.clone());
    (db, registry)
}

pub async fn seed_measure_type(
    db: &DatabaseConnection,
    measure_type: &str,
    suffix: &str,
) -> measure_types::Model {
    measure_types::ActiveModel {
        suffix: Set(suffix.to_string()),
        measure_type: Set(measure_type.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert measure type")
}

pub async fn seed_sensor(
    db: &DatabaseConnection,
    external_id: &str,
    tag: &str,
    min_value: f64,
    max_value: f64,
    measure_type_id: i32,
) -> sensors::Model {
    sensors::ActiveModel {
        external_id: Set(external_id.to_string()),
        description: Set(format!("{tag} sensor")),
        tag: Set(tag.to_string()),
        url: Set(format!("http://sensors.local/{external_id}")),
        polling_interval: Set(10),
        min_value: Set(min_value),
        max_value: Set(max_value),
        value: Set(min_value),
        time_stamp: Set(None),
        modified_on: Set(None),
        measure_type_id: Set(measure_type_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert sensor")
}

pub async fn seed_user(db: &DatabaseConnection, user_name: &str) -> users::Model {
    users::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_name: Set(user_name.to_string()),
        email: Set(Some(format!("{}@dorm.local", user_name.to_lowercase()))),
    }
    .insert(db)
    .await
    .expect("insert user")
}

/// Temperature sensor ranging 10..=20, the fixture most tests start from.
pub async fn seed_thermometer(db: &DatabaseConnection) -> sensors::Model {
    let celsius = seed_measure_type(db, "Temperature", "°C").await;
    seed_sensor(db, "thermo-1", "TemperatureSensor", 10.0, 20.0, celsius.id).await
}

/// A valid subscription request against `sensor_id`.
pub fn subscription(user_id: &str, sensor_id: i32) -> NewUserSensor {
    NewUserSensor {
        user_id: user_id.to_string(),
        sensor_id,
        name: "Room A".to_string(),
        description: "desc".to_string(),
        min_value: 11.0,
        max_value: 18.0,
        polling_interval: 15,
        latitude: 42.69,
        longitude: 23.32,
        is_public: true,
        alarm: false,
        image_url: "http://images.local/room-a.png".to_string(),
    }
}
