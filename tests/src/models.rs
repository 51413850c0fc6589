//! Models shared by the integration tests.

use chrono::NaiveDate;

crudkit::enumeration! {
    pub enum Status { Active, Closed }
}

crudkit::model! {
    pub struct UserAccount {
        pub id: i64,
        pub email: Option<String>,
        pub status: Status,
        pub age: Option<i32>,
        pub joined_on: Option<NaiveDate>,
    }
}

crudkit::model! {
    pub struct Employee {
        pub id: i64,
        pub name: String,
        pub salary: Option<i32>,
        pub status_code: Status,
    }
}

impl UserAccount {
    pub fn new(email: &str, status: Status) -> Self {
        Self {
            email: Some(email.to_string()),
            status,
            ..Self::default()
        }
    }
}
