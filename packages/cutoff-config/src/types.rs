use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub query: Query,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// Either "production" or "development". Error detail is only exposed in development.
	#[serde(default = "default_environment")]
	pub environment: String,
	#[serde(default)]
	pub cors_permissive: bool,
}
impl Service {
	pub fn is_development(&self) -> bool {
		self.environment == "development"
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Install the cutoff table and its server-side procedures on startup.
	#[serde(default)]
	pub ensure_schema: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Query {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
	/// Row bound for each direct distinct-value query when facet procedures are unavailable.
	#[serde(default = "default_facet_sample_size")]
	pub facet_sample_size: u32,
	#[serde(default = "default_top_courses")]
	pub top_courses: u32,
}
impl Default for Query {
	fn default() -> Self {
		Self {
			default_limit: default_limit(),
			max_limit: default_max_limit(),
			facet_sample_size: default_facet_sample_size(),
			top_courses: default_top_courses(),
		}
	}
}

fn default_environment() -> String {
	"production".to_string()
}

fn default_limit() -> u32 {
	25
}

fn default_max_limit() -> u32 {
	500
}

fn default_facet_sample_size() -> u32 {
	1_000
}

fn default_top_courses() -> u32 {
	5
}
