/// Liveness probe, answers every GET with a fixed body.
pub async fn hello_handler() -> &'static str {
    const MESSAGE: &str = "Is running";
    MESSAGE
}
