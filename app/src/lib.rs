//! To-do list web application

pub mod bootstrap;
pub mod config;
pub mod controllers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;
pub mod views;
