//! Read-path building blocks: the soft-delete predicate, case-insensitive
//! substring matching, and loading of related rows.

use std::collections::HashMap;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter};

use crate::entity::{measure_types, sensors, user_sensors, users};
use crate::error::AppResult;

use super::types::UserSensorDetails;

/// Must match the `ESCAPE` clause in [`contains_ci`].
const LIKE_ESCAPE: char = '!';

/// Rows that have not been soft-deleted. Applied to every listing and count.
pub(crate) fn active() -> SimpleExpr {
    user_sensors::Column::IsDeleted.eq(false)
}

/// `LOWER(col) LIKE LOWER('%needle%')`, with the needle's wildcards taken
/// literally. Both sides are folded by the database so they agree on every
/// character. An empty needle matches every row.
pub(crate) fn contains_ci<C>(column: C, needle: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    let pattern = format!("%{}%", escape_like(needle));
    Expr::cust_with_exprs(
        "$1 LIKE $2 ESCAPE '!'",
        [
            SimpleExpr::from(Func::lower(Expr::col(column))),
            SimpleExpr::from(Func::lower(Expr::val(pattern))),
        ],
    )
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Which related rows to load alongside each subscription. The sensor is
/// always loaded.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Expand {
    pub user: bool,
    pub measure_type: bool,
}

impl Expand {
    pub const USER_AND_SENSOR: Self = Self {
        user: true,
        measure_type: false,
    };
    pub const SENSOR_AND_MEASURE_TYPE: Self = Self {
        user: false,
        measure_type: true,
    };
    pub const FULL: Self = Self {
        user: true,
        measure_type: true,
    };
}

/// Attach related rows to `rows`, keeping their order.
pub(crate) async fn expand(
    db: &DatabaseConnection,
    rows: Vec<user_sensors::Model>,
    expand: Expand,
) -> AppResult<Vec<UserSensorDetails>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let sensors = rows.load_one(sensors::Entity, db).await?;

    let users = if expand.user {
        rows.load_one(users::Entity, db).await?
    } else {
        vec![None; rows.len()]
    };

    let measure_types = if expand.measure_type {
        load_measure_types(db, &sensors).await?
    } else {
        HashMap::new()
    };

    let details = rows
        .into_iter()
        .zip(sensors)
        .zip(users)
        .map(|((user_sensor, sensor), user)| {
            let measure_type = sensor
                .as_ref()
                .and_then(|s| measure_types.get(&s.measure_type_id).cloned());
            UserSensorDetails {
                user_sensor,
                user,
                sensor,
                measure_type,
            }
        })
        .collect();

    Ok(details)
}

async fn load_measure_types(
    db: &DatabaseConnection,
    sensors: &[Option<sensors::Model>],
) -> AppResult<HashMap<i32, measure_types::Model>> {
    let mut ids: Vec<i32> = sensors.iter().flatten().map(|s| s.measure_type_id).collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let by_id = measure_types::Entity::find()
        .filter(measure_types::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    Ok(by_id)
}
