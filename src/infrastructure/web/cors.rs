use actix_cors::Cors;

/// Any origin when `*` is configured, otherwise only the listed ones.
pub fn build_cors(origins: &[String]) -> Cors {
    if origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    origins.iter().fold(
        Cors::default().allow_any_method().allow_any_header(),
        |cors, origin| cors.allowed_origin(origin),
    )
}
