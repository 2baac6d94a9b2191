mod create_proposal;
pub mod expire_proposals;
mod get_proposal;
mod send_proposal;
mod sign_proposal;
mod subscribers;
mod view_proposal;

use actix_web::web;
use create_proposal::create_proposal_controller;
use get_proposal::get_proposal_controller;
use send_proposal::send_proposal_controller;
use sign_proposal::sign_proposal_controller;
use view_proposal::view_proposal_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/proposal", web::post().to(create_proposal_controller));
    cfg.route(
        "/proposal/{proposal_id}",
        web::get().to(get_proposal_controller),
    );
    cfg.route(
        "/proposal/{proposal_id}/send",
        web::post().to(send_proposal_controller),
    );
    cfg.route(
        "/proposal/{proposal_id}/view",
        web::post().to(view_proposal_controller),
    );
    cfg.route(
        "/proposal/{proposal_id}/sign",
        web::post().to(sign_proposal_controller),
    );
}
