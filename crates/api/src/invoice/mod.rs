mod get_invoice;
mod get_invoices;
mod mark_invoice_paid;
pub mod send_invoice_reminders;

use actix_web::web;
use get_invoice::get_invoice_controller;
use get_invoices::get_invoices_controller;
use mark_invoice_paid::mark_invoice_paid_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/invoice", web::get().to(get_invoices_controller));
    cfg.route(
        "/invoice/{invoice_id}",
        web::get().to(get_invoice_controller),
    );
    cfg.route(
        "/invoice/{invoice_id}/paid",
        web::post().to(mark_invoice_paid_controller),
    );
}
