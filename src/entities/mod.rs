//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod brand;
pub mod category;
pub mod hardware_details;
pub mod product;
pub mod product_image;
pub mod product_review;
pub mod software_details;
pub mod user;

// Re-export specific types to avoid conflicts
pub use brand::{Column as BrandColumn, Entity as Brand, Model as BrandModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use hardware_details::{
    Column as HardwareDetailsColumn, Condition, Entity as HardwareDetails,
    Model as HardwareDetailsModel,
};
pub use product::{
    Column as ProductColumn, Entity as Product, Model as ProductModel, ProductKind, ProductStatus,
};
pub use product_image::{
    Column as ProductImageColumn, Entity as ProductImage, Model as ProductImageModel,
};
pub use product_review::{
    Column as ProductReviewColumn, Entity as ProductReview, Model as ProductReviewModel,
};
pub use software_details::{
    Column as SoftwareDetailsColumn, Edition, Entity as SoftwareDetails, LicenseType,
    Model as SoftwareDetailsModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
