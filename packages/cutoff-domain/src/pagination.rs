use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub page: u32,
	pub limit: u32,
}
impl PageRequest {
	/// Zero is never a valid page or limit; both are raised to one.
	pub fn new(page: u32, limit: u32) -> Self {
		Self { page: page.max(1), limit: limit.max(1) }
	}

	pub fn window(&self) -> Window {
		let limit = u64::from(self.limit);

		Window { offset: u64::from(self.page.saturating_sub(1)) * limit, limit }
	}
}

/// Row window of a page query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
	pub offset: u64,
	pub limit: u64,
}
impl Window {
	/// Inclusive `(from, to)` row positions covered by the window.
	pub fn range(&self) -> (u64, u64) {
		(self.offset, (self.offset + self.limit).saturating_sub(1))
	}

	pub fn apply<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
		let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
		let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);

		rows.into_iter().skip(offset).take(limit).collect()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub page: u32,
	pub limit: u32,
	pub total: u64,
	pub total_pages: u64,
	pub has_next: bool,
	pub has_prev: bool,
}
impl Pagination {
	pub fn compute(page: u32, limit: u32, total: u64) -> Self {
		let limit_wide = u64::from(limit.max(1));

		Self {
			page,
			limit,
			total,
			total_pages: total.div_ceil(limit_wide),
			has_next: u64::from(page) * limit_wide < total,
			has_prev: page > 1,
		}
	}

	pub fn for_request(request: PageRequest, total: u64) -> Self {
		Self::compute(request.page, request.limit, total)
	}
}
