/// HTTP middleware construction
use crate::config::CorsConfig;
use actix_cors::Cors;

/// Build the cross-origin policy.
///
/// With `*` and credentials enabled the request origin is echoed back,
/// which is what browsers require for credentialed requests.
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in config.origins() {
            cors = cors.allowed_origin(origin);
        }
    }
    cors = cors.allow_any_method().allow_any_header().max_age(3600);

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }
    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn default_policy_echoes_any_origin_with_credentials() {
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&CorsConfig::default()))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://anywhere.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://anywhere.example"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn explicit_origins_reject_others() {
        let config = CorsConfig {
            allowed_origins: "https://blog.example".to_string(),
            allow_credentials: false,
        };
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&config))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .to_request();
        let rejected = match test::try_call_service(&app, req).await {
            Ok(resp) => resp
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none(),
            Err(_) => true,
        };
        assert!(rejected);
    }
}
