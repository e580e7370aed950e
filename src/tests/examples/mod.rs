mod config_validation;
mod google_metadata_token;
