#[tracing::instrument(name = "[GET] /", skip_all)]
pub async fn index() -> &'static str {
    "MagazineHub is alive."
}
