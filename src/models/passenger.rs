use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Passenger {
    pub passenger_id: i64,
    pub name: String,
    pub contact: Option<String>,
    pub email: String,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CreatePassengerRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub contact: Option<String>,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[schemars(example = "PassengerCreated::example")]
pub struct PassengerCreated {
    #[schemars(title = "Passenger ID")]
    pub passenger_id: i64,
}

impl PassengerCreated {
    pub fn example() -> Self {
        Self { passenger_id: 42 }
    }
}
