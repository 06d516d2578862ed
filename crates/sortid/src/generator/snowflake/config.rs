use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{ConfigError, Result, SnowflakeId, TWITTER_EPOCH_MS};

/// The reference point Snowflake timestamps count from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Epoch {
    /// Unix milliseconds.
    Millis(u64),
    /// An RFC 3339 timestamp (`2010-11-04T01:42:54.657Z`), or a naive
    /// `YYYY-MM-DD[THH:MM:SS[.fff]]` read as UTC.
    Timestamp(String),
}

impl Default for Epoch {
    fn default() -> Self {
        Self::Millis(TWITTER_EPOCH_MS)
    }
}

impl Epoch {
    /// Normalizes the epoch to Unix milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEpoch`] if the string is not a supported
    /// timestamp or lies before 1970-01-01.
    ///
    /// ```
    /// use sortid::{Epoch, TWITTER_EPOCH_MS};
    ///
    /// let epoch = Epoch::Timestamp("2010-11-04T01:42:54.657Z".into());
    /// assert_eq!(epoch.to_millis().unwrap(), TWITTER_EPOCH_MS);
    /// ```
    pub fn to_millis(&self) -> Result<u64, ConfigError> {
        match self {
            Self::Millis(ms) => Ok(*ms),
            Self::Timestamp(s) => parse_timestamp(s),
        }
    }
}

impl From<u64> for Epoch {
    fn from(ms: u64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for Epoch {
    fn from(s: &str) -> Self {
        Self::Timestamp(s.to_owned())
    }
}

fn parse_timestamp(raw: &str) -> Result<u64, ConfigError> {
    let s = raw.trim();
    let millis = if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        dt.timestamp_millis()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
    {
        naive.and_utc().timestamp_millis()
    } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        date.and_time(NaiveTime::default()).and_utc().timestamp_millis()
    } else {
        return Err(ConfigError::InvalidEpoch(raw.to_owned()));
    };

    u64::try_from(millis).map_err(|_| ConfigError::InvalidEpoch(raw.to_owned()))
}

/// User-facing Snowflake settings, validated once into a [`WorkerIdentity`].
///
/// With the `serde` feature the config deserializes from
/// `{"epoch": ..., "worker_id": ..., "datacenter_id": ...}` where `epoch` is
/// an integer or a timestamp string. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnowflakeConfig {
    pub epoch: Epoch,
    pub worker_id: u64,
    pub datacenter_id: u64,
}

impl SnowflakeConfig {
    /// Checks every field and normalizes the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if an id is outside
    /// `[0, 31]` or the epoch does not parse.
    pub fn validate(&self) -> Result<WorkerIdentity> {
        let epoch_ms = self.epoch.to_millis()?;
        WorkerIdentity::new(epoch_ms, self.datacenter_id, self.worker_id)
    }
}

/// A validated `(epoch, datacenter, worker)` triple.
///
/// Immutable once built: a generator's identity cannot change while it hands
/// out IDs. Build a new generator to use a different identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerIdentity {
    epoch_ms: u64,
    datacenter_id: u64,
    worker_id: u64,
}

impl WorkerIdentity {
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if either id is
    /// outside `[0, 31]`.
    pub fn new(epoch_ms: u64, datacenter_id: u64, worker_id: u64) -> Result<Self> {
        if worker_id > SnowflakeId::max_worker_id() {
            return Err(ConfigError::WorkerIdOutOfRange(worker_id).into());
        }
        if datacenter_id > SnowflakeId::max_datacenter_id() {
            return Err(ConfigError::DatacenterIdOutOfRange(datacenter_id).into());
        }
        Ok(Self {
            epoch_ms,
            datacenter_id,
            worker_id,
        })
    }

    pub const fn epoch_ms(&self) -> u64 {
        self.epoch_ms
    }

    pub const fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }
}

impl TryFrom<SnowflakeConfig> for WorkerIdentity {
    type Error = crate::Error;

    fn try_from(config: SnowflakeConfig) -> Result<Self> {
        config.validate()
    }
}
