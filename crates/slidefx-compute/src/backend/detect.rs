//! Backend detection and auto-selection.

use super::Backend;

/// Information about a compute backend.
#[derive(Debug, Clone)]
pub struct BackendInfo {
    /// Backend type.
    pub backend: Backend,
    /// Human-readable name.
    pub name: &'static str,
    /// Whether backend is available.
    pub available: bool,
    /// Priority for auto-selection (higher = preferred).
    pub priority: u32,
    /// Description.
    pub description: &'static str,
}

/// Detect all available backends.
pub fn detect_backends() -> Vec<BackendInfo> {
    let threads = rayon::current_num_threads();

    let mut backends = vec![
        BackendInfo {
            backend: Backend::Cpu,
            name: "CPU",
            available: true,
            // Only worth preferring when there is more than one worker
            priority: if threads > 1 { 20 } else { 5 },
            description: "CPU with rayon parallelization",
        },
        BackendInfo {
            backend: Backend::Scalar,
            name: "Scalar",
            available: true,
            priority: 10,
            description: "Single-threaded reference kernels",
        },
    ];

    backends.sort_by(|a, b| b.priority.cmp(&a.priority));
    backends
}

/// Select the best available backend.
pub fn select_best_backend() -> Backend {
    let backends = detect_backends();

    backends
        .into_iter()
        .filter(|b| b.available)
        .max_by_key(|b| b.priority)
        .map(|b| b.backend)
        .unwrap_or(Backend::Cpu)
}

/// Get description of available backends.
pub fn describe_backends() -> String {
    let backends = detect_backends();
    let mut desc = String::new();

    for info in backends {
        let status = if info.available { "+" } else { "-" };
        desc.push_str(&format!("[{}] {}: {}\n", status, info.name, info.description));
    }

    desc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_sorted_by_priority() {
        let backends = detect_backends();
        assert_eq!(backends.len(), 2);
        assert!(backends[0].priority >= backends[1].priority);
    }

    #[test]
    fn test_best_is_never_auto() {
        assert_ne!(select_best_backend(), Backend::Auto);
    }
}
