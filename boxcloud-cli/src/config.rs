use anyhow::Context as _;
use boxcloud::Config;

/// Settings read from the environment, or from a `.env` file.
pub struct Settings {
    access_token: String,
    base_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            access_token: dotenv::var("BOX_ACCESS_TOKEN")
                .context("`BOX_ACCESS_TOKEN` was not set")?,
            base_url: dotenv::var("BOX_BASE_URL").ok(),
        })
    }

    pub fn to_config(&self) -> Result<Config, boxcloud::Error> {
        let config = Config::new(self.access_token.as_str());

        match &self.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => Ok(config),
        }
    }
}
