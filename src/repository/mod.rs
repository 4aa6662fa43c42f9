pub mod category;
pub mod customer;
pub mod dish;

pub use category::CategoryRepository;
pub use customer::CustomerRepository;
pub use dish::DishRepository;
