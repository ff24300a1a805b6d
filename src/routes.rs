use crate::{
    api::{attendance, payroll, schedule},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/clock-in").route(web::post().to(attendance::clock_in)),
                    )
                    .service(
                        web::resource("/clock-in/confirm")
                            .route(web::post().to(attendance::confirm_clock_in)),
                    )
                    .service(
                        web::resource("/clock-out").route(web::post().to(attendance::clock_out)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(attendance::approve_time_log)),
                    )
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(attendance::reject_time_log)),
                    ),
            )
            .service(
                web::scope("/schedule")
                    .service(
                        web::resource("")
                            .route(web::post().to(schedule::create_schedule)),
                    )
                    // /schedule/swap must register before /schedule/{id}
                    .service(
                        web::resource("/swap").route(web::post().to(schedule::swap_schedules)),
                    )
                    .service(
                        web::resource("/{id}").route(web::put().to(schedule::update_schedule)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .service(web::resource("/rows").route(web::get().to(payroll::salary_rows)))
                    .service(
                        web::resource("/slip").route(web::post().to(payroll::create_salary_slip)),
                    ),
            ),
    );
}
