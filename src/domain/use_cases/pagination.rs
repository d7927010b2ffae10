use std::future::Future;

use crate::{
    entities::pagination::{Page, PageRequest, Pagination},
    errors::AppError,
};

/// Runs the page query and the count query concurrently and assembles the
/// page with its metadata. Either failure fails the whole page.
pub async fn load_page<T, L, C>(request: PageRequest, items: L, total: C) -> Result<Page<T>, AppError>
where
    L: Future<Output = Result<Vec<T>, AppError>>,
    C: Future<Output = Result<u64, AppError>>,
{
    let (items, total_items) = tokio::try_join!(items, total)?;

    Ok(Page {
        items,
        pagination: Pagination::new(request, total_items),
    })
}
