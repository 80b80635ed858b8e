use futures::Stream;

use super::pager::Pager;
use super::request::{LoadRequest, LoadResult};
use super::source::PagingSource;
use crate::network::NetworkFailure;

impl<S: PagingSource> Pager<S> {
    /// Lazily produce every item from the first page onward.
    ///
    /// Each call restarts from a fresh refresh. Pages are loaded only as the
    /// consumer pulls; the stream ends after an empty page, or after
    /// yielding the first failure.
    pub fn stream(
        &self,
    ) -> impl Stream<Item = Result<S::Item, NetworkFailure>> + Send + '_ {
        let load_size = self.page_size();
        async_stream::stream! {
            let mut request = LoadRequest::initial(load_size);
            loop {
                match self.load(request).await {
                    LoadResult::Page { items, next_key, .. } => {
                        for item in items {
                            yield Ok(item);
                        }
                        match next_key {
                            Some(key) => {
                                request =
                                    LoadRequest::Append { key, load_size };
                            }
                            None => break,
                        }
                    }
                    LoadResult::Error { cause } => {
                        yield Err(cause);
                        break;
                    }
                }
            }
        }
    }
}
