use chrono::Utc;
use rust_decimal::Decimal;
use validator::{Validate, ValidationError};

use crate::entities::{category, customer, dish};

/// Input types mirroring the back-office forms. All field-presence and format
/// checks live here; the repositories trust what they are handed.
#[derive(Debug, Clone, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 1, message = "full name is required"))]
    pub full_name: String,
    #[validate(contains(pattern = "@", message = "email must contain '@'"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "delivery address is required"))]
    pub delivery_address: String,
}

impl CustomerForm {
    pub fn into_record(self) -> customer::Model {
        customer::Model {
            customer_id: 0,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            delivery_address: Some(self.delivery_address),
            registration_date: Utc::now(),
            active: true,
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
}

impl CategoryForm {
    pub fn into_record(self) -> category::Model {
        category::Model {
            category_id: 0,
            name: self.name,
            description: self.description,
            active: true,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct DishForm {
    pub category_id: i32,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(custom(function = price_is_positive))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "preparation time must be at least one minute"))]
    pub preparation_time: i32,
    pub vegetarian: bool,
    pub spicy: bool,
}

impl DishForm {
    pub fn into_record(self) -> dish::Model {
        dish::Model {
            dish_id: 0,
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: self.price,
            preparation_time: self.preparation_time,
            available: true,
            vegetarian: self.vegetarian,
            spicy: self.spicy,
            created_at: Utc::now(),
        }
    }
}

// Exact decimal comparison; anything above zero is a legal price, however
// close to the boundary.
fn price_is_positive(price: &Decimal) -> Result<(), ValidationError> {
    if *price > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("price_not_positive"))
    }
}
