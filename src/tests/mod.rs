mod gateway;
mod invalid_json;
mod notes;
