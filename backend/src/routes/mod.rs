pub mod client_conversion;
pub mod landing;
pub mod late_cancellations;
pub mod sales;
