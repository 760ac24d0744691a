//! User sensor registry.
//!
//! Owns every rule about a user's sensor subscriptions: field validation,
//! bounds checking against the physical sensor, soft deletion and the
//! visibility, search and pagination rules of the read paths.

mod query;
mod types;
pub mod validate;

pub use types::{EditUserSensor, NewUserSensor, Page, SensorBounds, UserSensorDetails};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entity::{sensors, user_sensors, users};
use crate::error::{AppError, AppResult};

use query::{Expand, active, contains_ci, expand};
use validate::{
    DESCRIPTION_LENGTH, NAME_LENGTH, POLLING_INTERVAL_SECONDS, char_len, require_in_range,
    require_non_empty, require_positive,
};

#[derive(Clone)]
pub struct UserSensorRegistry {
    db: DatabaseConnection,
}

impl UserSensorRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a subscription to the sensor with numeric id `input.sensor_id`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when a field is empty or out of range, including
    /// min/max values outside the sensor's own range. `NotFound` when the
    /// sensor does not exist.
    pub async fn create(&self, input: NewUserSensor) -> AppResult<user_sensors::Model> {
        tracing::debug!(
            user_id = %input.user_id,
            sensor_id = input.sensor_id,
            "Creating user sensor"
        );

        require_non_empty(&input.user_id, "User Id cannot be null or empty!")?;
        require_positive(input.sensor_id, "Sensor Id cannot be less or equal 0!")?;
        require_in_range(
            char_len(&input.name),
            &NAME_LENGTH,
            "Name must be between 3 and 20 symbols!",
        )?;
        require_in_range(
            char_len(&input.description),
            &DESCRIPTION_LENGTH,
            "Description must be between 3 and 250 symbols!",
        )?;
        require_non_empty(&input.image_url, "Image URL cannot be null or empty!")?;
        require_in_range(
            input.polling_interval,
            &POLLING_INTERVAL_SECONDS,
            "Polling interval must be between 10 and 40 seconds!",
        )?;

        let sensor = sensors::Entity::find_by_id(input.sensor_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Sensor with Id {} does not exist!", input.sensor_id))
            })?;

        check_sensor_bounds(&sensor, input.min_value, input.max_value)?;

        let created = user_sensors::ActiveModel {
            user_id: Set(input.user_id),
            sensor_id: Set(input.sensor_id),
            name: Set(input.name),
            description: Set(input.description),
            min_value: Set(input.min_value),
            max_value: Set(input.max_value),
            polling_interval: Set(input.polling_interval),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            is_public: Set(input.is_public),
            alarm: Set(input.alarm),
            image_url: Set(input.image_url),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(user_sensor_id = created.id, "User sensor created");
        Ok(created)
    }

    /// Replace the mutable fields of an existing subscription.
    ///
    /// Bounds are validated against the sensor found by
    /// `input.external_sensor_id`, which is not required to be the sensor the
    /// subscription was created for.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for bad fields or out-of-range bounds, `NotFound`
    /// when either the sensor or the subscription is missing.
    pub async fn edit(&self, input: EditUserSensor) -> AppResult<()> {
        tracing::debug!(
            user_sensor_id = input.user_sensor_id,
            external_sensor_id = %input.external_sensor_id,
            "Editing user sensor"
        );

        require_positive(
            input.user_sensor_id,
            "User sensor Id cannot be less or equal 0!",
        )?;
        require_non_empty(
            &input.external_sensor_id,
            "External sensor Id cannot be null or empty!",
        )?;
        require_in_range(
            char_len(&input.name),
            &NAME_LENGTH,
            "Name must be between 3 and 20 symbols!",
        )?;
        require_in_range(
            input.polling_interval,
            &POLLING_INTERVAL_SECONDS,
            "Polling interval must be between 10 and 40 seconds!",
        )?;

        let sensor = self
            .sensor_range_for(&input.external_sensor_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Sensor with external Id {} does not exist!",
                    input.external_sensor_id
                ))
            })?;

        check_sensor_bounds(&sensor, input.min_value, input.max_value)?;

        let target = user_sensors::Entity::find_by_id(input.user_sensor_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "User sensor with Id {} does not exist!",
                    input.user_sensor_id
                ))
            })?;

        if target.sensor_id != sensor.id {
            tracing::warn!(
                user_sensor_id = target.id,
                stored_sensor_id = target.sensor_id,
                validated_sensor_id = sensor.id,
                "Edit validated against a different sensor than the subscription references"
            );
        }

        let mut record: user_sensors::ActiveModel = target.into();
        record.name = Set(input.name);
        record.description = Set(input.description);
        record.min_value = Set(input.min_value);
        record.max_value = Set(input.max_value);
        record.polling_interval = Set(input.polling_interval);
        record.latitude = Set(input.latitude);
        record.longitude = Set(input.longitude);
        record.is_public = Set(input.is_public);
        record.alarm = Set(input.alarm);
        record.update(&self.db).await?;

        tracing::info!(user_sensor_id = input.user_sensor_id, "User sensor updated");
        Ok(())
    }

    /// Flag a subscription as deleted. Deleting twice is not an error.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a non-positive id, `NotFound` if no row has it.
    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        tracing::debug!(user_sensor_id = id, "Soft deleting user sensor");

        require_positive(id, "Invalid Id!")?;

        let target = user_sensors::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Sensor with Id {id} does not exist!")))?;

        let mut record: user_sensors::ActiveModel = target.into();
        record.is_deleted = Set(true);
        record.update(&self.db).await?;

        tracing::info!(user_sensor_id = id, "User sensor soft deleted");
        Ok(())
    }

    /// Direct lookup by id. Sees soft-deleted rows.
    pub async fn get(&self, id: i32) -> AppResult<Option<user_sensors::Model>> {
        Ok(user_sensors::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_public(&self) -> AppResult<Vec<UserSensorDetails>> {
        let rows = user_sensors::Entity::find()
            .filter(active())
            .filter(user_sensors::Column::IsPublic.eq(true))
            .order_by_asc(user_sensors::Column::Id)
            .all(&self.db)
            .await?;

        expand(&self.db, rows, Expand::USER_AND_SENSOR).await
    }

    /// Private subscriptions owned by `user_id`.
    pub async fn list_private(&self, user_id: &str) -> AppResult<Vec<UserSensorDetails>> {
        require_non_empty(user_id, "Id cannot be null!")?;

        let rows = user_sensors::Entity::find()
            .filter(active())
            .filter(user_sensors::Column::UserId.eq(user_id))
            .filter(user_sensors::Column::IsPublic.eq(false))
            .order_by_asc(user_sensors::Column::Id)
            .all(&self.db)
            .await?;

        expand(&self.db, rows, Expand::USER_AND_SENSOR).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<UserSensorDetails>> {
        let rows = user_sensors::Entity::find()
            .filter(active())
            .order_by_asc(user_sensors::Column::Id)
            .all(&self.db)
            .await?;

        expand(&self.db, rows, Expand::USER_AND_SENSOR).await
    }

    /// Every subscription owned by `user_id`, public or not, with the
    /// sensor's measure type.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<UserSensorDetails>> {
        require_non_empty(user_id, "Id cannot be null!")?;

        let rows = user_sensors::Entity::find()
            .filter(active())
            .filter(user_sensors::Column::UserId.eq(user_id))
            .order_by_asc(user_sensors::Column::Id)
            .all(&self.db)
            .await?;

        expand(&self.db, rows, Expand::SENSOR_AND_MEASURE_TYPE).await
    }

    /// Subscriptions whose owner name contains `name_filter` and whose sensor
    /// tag contains `tag_filter`, both case-insensitively, one page at a time.
    /// Empty filters match everything.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the page number or size is zero, or the page
    /// starts past what the store can address.
    pub async fn search(
        &self,
        name_filter: &str,
        tag_filter: &str,
        page: Page,
    ) -> AppResult<Vec<UserSensorDetails>> {
        require_positive(page.page, "Page must be greater than 0!")?;
        require_positive(page.page_size, "Page size must be greater than 0!")?;
        // The store binds offsets as signed 64-bit integers
        if i64::try_from(page.offset()).is_err() {
            return Err(AppError::InvalidArgument("Page is out of range!".to_string()));
        }

        let rows = user_sensors::Entity::find()
            .join(JoinType::InnerJoin, user_sensors::Relation::User.def())
            .join(JoinType::InnerJoin, user_sensors::Relation::Sensor.def())
            .filter(active())
            .filter(contains_ci((users::Entity, users::Column::UserName), name_filter))
            .filter(contains_ci((sensors::Entity, sensors::Column::Tag), tag_filter))
            .order_by_asc(user_sensors::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.page_size))
            .all(&self.db)
            .await?;

        expand(&self.db, rows, Expand::FULL).await
    }

    pub async fn count_matching_tag(&self, text: &str) -> AppResult<u64> {
        let total = user_sensors::Entity::find()
            .join(JoinType::InnerJoin, user_sensors::Relation::Sensor.def())
            .filter(active())
            .filter(contains_ci((sensors::Entity, sensors::Column::Tag), text))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    pub async fn count_all(&self) -> AppResult<u64> {
        let total = user_sensors::Entity::find()
            .filter(active())
            .count(&self.db)
            .await?;
        Ok(total)
    }

    pub async fn count_matching_owner_name(&self, text: &str) -> AppResult<u64> {
        let total = user_sensors::Entity::find()
            .join(JoinType::InnerJoin, user_sensors::Relation::User.def())
            .filter(active())
            .filter(contains_ci((users::Entity, users::Column::UserName), text))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    /// Current record of the physical sensor with the given external id, if
    /// any. Ingestion uses this to read the bounds before storing a value.
    pub async fn sensor_range_for(
        &self,
        external_sensor_id: &str,
    ) -> AppResult<Option<sensors::Model>> {
        require_non_empty(external_sensor_id, "Sensor Id cannot be null!")?;

        Ok(sensors::Entity::find()
            .filter(sensors::Column::ExternalId.eq(external_sensor_id))
            .one(&self.db)
            .await?)
    }

    /// Range of the first sensor, by ascending id, whose tag contains
    /// `tag_substring` case-insensitively. Other matching sensors are ignored
    /// even if their ranges differ.
    ///
    /// # Errors
    ///
    /// `NotFound` if no sensor tag matches.
    pub async fn sensor_type_bounds(&self, tag_substring: &str) -> AppResult<SensorBounds> {
        let sensor = sensors::Entity::find()
            .filter(contains_ci(
                (sensors::Entity, sensors::Column::Tag),
                tag_substring,
            ))
            .order_by_asc(sensors::Column::Id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No sensor has a tag matching '{tag_substring}'!"))
            })?;

        Ok(SensorBounds::from(&sensor))
    }
}

fn check_sensor_bounds(sensor: &sensors::Model, min_value: f64, max_value: f64) -> AppResult<()> {
    let range = sensor.min_value..=sensor.max_value;
    require_in_range(
        min_value,
        &range,
        &format!(
            "Minimal value must be between {} and {}!",
            sensor.min_value, sensor.max_value
        ),
    )?;
    require_in_range(
        max_value,
        &range,
        &format!(
            "Maximal value must be between {} and {}!",
            sensor.min_value, sensor.max_value
        ),
    )
}
