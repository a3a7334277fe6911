pub mod analyze_data_uri;
pub mod analyze_image;
