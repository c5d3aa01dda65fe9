use super::window::{WindowWidth, DEFAULT_WINDOWS};
use crate::utils::errors::MsmError;

/// Tuning knobs of the MSM engine. None of them affect the result, only how
/// fast it is computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsmConfig {
    /// Window widths the cost model chooses from. A single entry forces
    /// that width.
    pub windows: Vec<WindowWidth>,
    /// Size of a dedicated worker pool. `None` schedules chunks on the
    /// global rayon pool, sized to the available parallelism.
    pub num_workers: Option<usize>,
}

impl Default for MsmConfig {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
            num_workers: None,
        }
    }
}

impl MsmConfig {
    /// Builds a config from raw window widths, rejecting widths without a
    /// compiled code path.
    pub fn from_widths(widths: &[usize]) -> Result<Self, MsmError> {
        let windows = widths
            .iter()
            .map(|&c| WindowWidth::try_from(c))
            .collect::<Result<Vec<_>, _>>()?;
        if windows.is_empty() {
            return Err(MsmError::EmptyWindowTable);
        }
        Ok(Self {
            windows,
            ..Default::default()
        })
    }

    pub fn with_window(mut self, window: WindowWidth) -> Self {
        self.windows = vec![window];
        self
    }

    pub fn with_windows(mut self, windows: impl IntoIterator<Item = WindowWidth>) -> Self {
        self.windows = windows.into_iter().collect();
        self
    }

    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    pub fn validate(&self) -> Result<(), MsmError> {
        if self.windows.is_empty() {
            return Err(MsmError::EmptyWindowTable);
        }
        match self.num_workers {
            Some(0) => Err(MsmError::InvalidWorkerCount(0)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_static_table() {
        let config = MsmConfig::default();
        assert_eq!(config.windows, DEFAULT_WINDOWS);
        assert_eq!(config.num_workers, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_widths_checks_each_width() {
        let config = MsmConfig::from_widths(&[5, 11]).unwrap();
        assert_eq!(config.windows, vec![WindowWidth::C5, WindowWidth::C11]);

        assert!(matches!(
            MsmConfig::from_widths(&[8, 20]),
            Err(MsmError::UnsupportedWindow(20))
        ));
        assert!(matches!(
            MsmConfig::from_widths(&[]),
            Err(MsmError::EmptyWindowTable)
        ));
    }

    #[test]
    fn builders() {
        let config = MsmConfig::default()
            .with_window(WindowWidth::C12)
            .with_num_workers(3);
        assert_eq!(config.windows, vec![WindowWidth::C12]);
        assert_eq!(config.num_workers, Some(3));

        let config = MsmConfig::default().with_windows([]);
        assert!(matches!(config.validate(), Err(MsmError::EmptyWindowTable)));
        let config = MsmConfig::default().with_num_workers(0);
        assert!(matches!(
            config.validate(),
            Err(MsmError::InvalidWorkerCount(0))
        ));
    }
}
