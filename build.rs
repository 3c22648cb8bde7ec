use std::env;
use std::process::Command;

// CPU features we want to detect
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    rustc_flag: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Groups all CPU features this crate has kernels for.
    // The AVX2 kernels also use FMA; every AVX2-capable x86-64 part ships FMA.
    fn features() -> Vec<CpuFeature> {
        vec![CpuFeature {
            name: "avx2",
            rustc_flag: "+avx2,+avx,+fma",
            cfg_flag: "avx2",
            detected: false,
        }]
    }
}

// Feature detection trait to make implementations more modular
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected = contents.contains(feature.name);
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                if feature.name == "avx2" {
                    feature.detected = contents.contains("hw.optional.avx2_0: 1");
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// Factory that creates the appropriate detector for the current OS
struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        let detectors = Self::cpu_features_detectors();

        for detector in detectors {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &[CpuFeature]) {
        // Use the highest detected feature; without one, fall back to
        // unvectorized builds.
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| {
                println!("cargo:rustc-flag=-C");
                println!("cargo:rustc-flag=target-feature={}", cpu_feature.rustc_flag);
                cpu_feature.cfg_flag
            })
            .unwrap_or("fallback");

        println!("applying: {cfg_flag}");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    let mut features = CpuFeature::features();

    // Determine if we're cross-compiling
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    let is_native_build = host == target;

    // Only run CPU detection for native builds
    if is_native_build {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    // On x86-64 hosts where detection came up empty (containers without a
    // readable /proc/cpuinfo, for instance) assume AVX2: the baseline for
    // the machines this crate targets.
    if is_native_build
        && target.starts_with("x86_64")
        && !features.iter().any(|feature| feature.detected)
    {
        for feature in features.iter_mut() {
            if feature.name == "avx2" {
                feature.detected = true;
            }
        }
    }

    PlatformDetector::apply(&features);
}
