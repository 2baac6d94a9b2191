mod cancel_booking;
mod create_booking;

use actix_web::web;
use cancel_booking::cancel_booking_controller;
use create_booking::create_booking_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/availability/{profile_id}/booking",
        web::post().to(create_booking_controller),
    );
    cfg.route(
        "/booking/{booking_id}",
        web::delete().to(cancel_booking_controller),
    );
}
