//! CLI command implementations.

pub mod inspect;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cpumap_core::{Diagnostics, Record};
use tracing::warn;

use crate::config::SyncConfig;

/// Locate the CPU definition file in a QEMU source tree.
fn source_file(qemu_dir: &Path, config: &SyncConfig) -> Result<PathBuf> {
    let path = qemu_dir.join(&config.source.path);
    if !path.is_file() {
        bail!("QEMU source file not found: {}", path.display());
    }
    Ok(path)
}

/// Extract the model records of a QEMU source tree.
fn load_records(qemu_dir: &Path, config: &SyncConfig) -> Result<Vec<Record>> {
    let path = source_file(qemu_dir, config)?;
    cpumap_extract::load_records(&path, &config.extract_options())
        .with_context(|| format!("extracting CPU models from {}", path.display()))
}

/// Emit every collected diagnostic as a warning.
fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        warn!("{diagnostic}");
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    pub const CPU_C: &str = r#"
#define PPRO_FEATURES (CPUID_FP87 | CPUID_DE | CPUID_PSE | CPUID_TSC | \
          CPUID_MSR | CPUID_MCE | CPUID_CX8 | CPUID_PGE | CPUID_CMOV | \
          CPUID_PAT | CPUID_FXSR | CPUID_MMX | CPUID_SSE | CPUID_SSE2 | \
          CPUID_PAE | CPUID_SEP | CPUID_APIC)

static const X86CPUDefinition builtin_x86_defs[] = {
    {
        .name = "Opteron_G1",
        .level = 5,
        .vendor = CPUID_VENDOR_AMD,
        .family = 15,
        .model = 6,
        .stepping = 1,
        .features[FEAT_1_EDX] =
            PPRO_FEATURES,
        .model_id = "AMD Opteron 240 (Gen 1 Class Opteron)",
    },
    {
        .name = "Skylake-Client",
        .level = 0xd,
        .vendor = CPUID_VENDOR_INTEL,
        .family = 6,
        .model = 94,
        .stepping = 3,
        .features[FEAT_1_EDX] =
            CPUID_FP87 | CPUID_SSE2,
        .features[FEAT_7_0_EBX] =
            CPUID_7_0_EBX_HLE | CPUID_7_0_EBX_RTM,
        .versions = (X86CPUVersionDefinition[]) {
            { .version = 1 },
            {
                .version = 2,
                .alias = "Skylake-Client-IBRS",
                .props = (PropValue[]) {
                    { "spec-ctrl", "on" },
                    { "model-id",
                      "Intel Core Processor (Skylake, IBRS)" },
                    { /* end of list */ }
                }
            },
            {
                .version = 3,
                .props = (PropValue[]) {
                    { "hle", "off" },
                    { "rtm", "off" },
                    { /* end of list */ }
                }
            },
            { /* end of list */ }
        }
    },
};
"#;

    pub const INDEX: &str = "\
<cpus>
  <arch name='x86'>
    <group name='AMD CPU models'>
      <include filename='x86_Opteron_G1.xml'/>
    </group>
    <group name='Intel CPU models'>
      <include filename='x86_486.xml'/>
    </group>
  </arch>
</cpus>
";

    pub const FEATURES: &str = "\
<cpus>
  <feature name='fpu'/>
  <feature name='sse2'/>
  <feature name='hle'/>
  <feature name='rtm'/>
</cpus>
";

    /// Lay out a QEMU tree and a corpus below `root`.
    pub fn layout(root: &Path) -> (PathBuf, PathBuf) {
        let qemu = root.join("qemu");
        let outdir = root.join("cpu_map");
        std::fs::create_dir_all(qemu.join("target/i386")).unwrap();
        std::fs::create_dir_all(&outdir).unwrap();
        std::fs::write(qemu.join("target/i386/cpu.c"), CPU_C).unwrap();
        std::fs::write(outdir.join("index.xml"), INDEX).unwrap();
        std::fs::write(outdir.join("x86_features.xml"), FEATURES).unwrap();
        (qemu, outdir)
    }
}
