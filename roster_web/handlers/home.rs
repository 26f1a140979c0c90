/// GET / – Plain greeting, handy as a liveness probe.
pub async fn home_handler() -> &'static str {
    "This is the roster home page"
}
