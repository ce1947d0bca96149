// SPDX-License-Identifier: GPL-3.0-only

//! Byte-size formatting shared by the output layers

const SI_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
const IEC_UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

fn humanize(bytes: u64, base: f64, units: &[&str; 7]) -> String {
    if bytes < 10 {
        return format!("{} B", bytes);
    }

    let mut steps = 0;
    let mut val = bytes as f64;

    while val >= base && steps < units.len() - 1 {
        val /= base;
        steps += 1;
    }

    // One decimal of precision, rounded half up
    let val = (val * 10.0 + 0.5).floor() / 10.0;

    if val < 10.0 {
        format!("{:.1} {}", val, units[steps])
    } else {
        format!("{:.0} {}", val, units[steps])
    }
}

/// Convert bytes to SI units (e.g. "1.5 GB")
pub fn bytes_to_si(bytes: u64) -> String {
    humanize(bytes, 1000.0, &SI_UNITS)
}

/// Convert bytes to IEC units (e.g. "1.5 GiB")
pub fn bytes_to_iec(bytes: u64) -> String {
    humanize(bytes, 1024.0, &IEC_UNITS)
}
