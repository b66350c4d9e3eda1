use pantry_lib::context::PantryContext;
use pantry_test_util::dataset::{sample_recipes, write_dataset};
use pantry_test_util::index::{sample_index_rows, write_index};

/// A tempdir holding the sample dataset and index, and a context rooted there.
///
/// The caller must hold the returned [`tempfile::TempDir`] to keep the
/// artifacts alive for the duration of the test.
pub fn sample_context() -> (tempfile::TempDir, PantryContext) {
    let tmp = tempfile::tempdir().unwrap();
    write_dataset(tmp.path(), &sample_recipes());
    write_index(tmp.path(), &sample_index_rows());
    let ctx = PantryContext::new(tmp.path().to_path_buf());
    (tmp, ctx)
}

/// A context pointing at an empty tempdir, so runtime loading fails.
pub fn empty_context() -> (tempfile::TempDir, PantryContext) {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = PantryContext::new(tmp.path().to_path_buf());
    (tmp, ctx)
}
