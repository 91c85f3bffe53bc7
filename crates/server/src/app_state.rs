use catalogue::Catalogue;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalogue: Catalogue,
}
