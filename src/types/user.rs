use serde::{Deserialize, Serialize};

use crate::types::validate::{Validate, ValidationErrors, Validator};

#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterUserPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterUserPayload {
    fn validate(&self, validator: &Validator, errors: &mut ValidationErrors) {
        errors.require("name", &self.name);
        validator.email(errors, "email", &self.email);
        validator.password(errors, "password", &self.password);
    }
}

pub struct DbUserCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Serialize, Deserialize)]
pub struct UserCreateRes {
    pub id: String,
}
