mod auth;
mod fake;
mod health;
