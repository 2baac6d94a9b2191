mod create_availability_profile;
mod get_availability_profile;
mod get_available_slots;
mod update_availability_profile;

use actix_web::web;
use create_availability_profile::create_availability_profile_controller;
use get_availability_profile::get_availability_profile_controller;
use get_available_slots::get_available_slots_controller;
use update_availability_profile::update_availability_profile_controller;

pub(crate) use create_availability_profile::parse_weekly_rules;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/availability",
        web::post().to(create_availability_profile_controller),
    );
    cfg.route(
        "/availability/{profile_id}",
        web::get().to(get_availability_profile_controller),
    );
    cfg.route(
        "/availability/{profile_id}",
        web::put().to(update_availability_profile_controller),
    );
    cfg.route(
        "/availability/{profile_id}/slots",
        web::get().to(get_available_slots_controller),
    );
}
