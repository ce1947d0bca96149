// SPDX-License-Identifier: GPL-3.0-only

//! Rendering resolved devices as JSON or as template lines

mod filters;
pub mod templates;

use std::collections::HashMap;

use diskpick_core::{ResolvedDevice, classify};
use diskpick_types::bytes_to_iec;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::config::Config;

const TEMPLATE_NAME: &str = "line";

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("could not use the template: {0}")]
    Template(#[from] tera::Error),

    #[error("the output format leads to duplicates in the list of disks: {0:?}")]
    DuplicateLine(String),

    #[error("could not serialize to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What `--format` resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Template(String),
}

impl OutputFormat {
    /// Resolve a format name: "json", a built-in template, a template named
    /// in the config, or else the argument itself as a literal template.
    pub fn resolve(name: &str, config: &Config) -> Self {
        if name == "json" {
            return Self::Json;
        }
        if let Some(template) = templates::builtin(name) {
            return Self::Template(template.to_string());
        }
        if let Some(template) = config.formats.get(name) {
            return Self::Template(template.clone());
        }
        Self::Template(name.to_string())
    }
}

/// Flat view of a device handed to line templates. Absent text renders empty.
#[derive(Debug, Serialize)]
pub struct DisplayRow<'a> {
    pub object_path: &'a str,
    pub device: &'a str,
    pub preferred_size: u64,
    pub size: u64,
    pub id_usage: &'a str,
    pub id_type: &'a str,
    pub id_label: &'a str,
    pub id_uuid: &'a str,
    pub drive_model: &'a str,
    pub drive_vendor: &'a str,
    pub mount_point: &'a str,
    pub importance: u32,
    /// Condensed model, size, type, label and device, for list-style templates
    pub summary: Vec<String>,
    pub record: &'a ResolvedDevice,
}

impl<'a> DisplayRow<'a> {
    pub fn new(device: &'a ResolvedDevice) -> Self {
        let block = device.block();
        let drive = device.root_drive();
        let preferred_size = device.preferred_size().unwrap_or(0);

        let drive_model = drive.and_then(|d| d.model.as_deref()).unwrap_or("");
        let device_node = block.display_device().unwrap_or("");
        let id_type = block.id_type.as_deref().unwrap_or("");
        let id_label = block.id_label.as_deref().unwrap_or("");

        let summary = vec![
            filters::condense_text(drive_model),
            bytes_to_iec(preferred_size),
            id_type.to_string(),
            id_label.to_string(),
            device_node.to_string(),
        ];

        Self {
            object_path: device.object_path(),
            device: device_node,
            preferred_size,
            size: block.size.unwrap_or(0),
            id_usage: block.id_usage.as_deref().unwrap_or(""),
            id_type,
            id_label,
            id_uuid: block.id_uuid.as_deref().unwrap_or(""),
            drive_model,
            drive_vendor: drive.and_then(|d| d.vendor.as_deref()).unwrap_or(""),
            mount_point: block.mount_point().unwrap_or(""),
            importance: classify(device).level(),
            summary,
            record: device,
        }
    }
}

/// Rendered lines plus the reverse mapping from line to device
#[derive(Debug)]
pub struct Rendered<'a> {
    pub lines: Vec<String>,
    pub by_line: HashMap<String, &'a ResolvedDevice>,
}

impl<'a> Rendered<'a> {
    pub fn device_for(&self, line: &str) -> Option<&'a ResolvedDevice> {
        self.by_line.get(line).copied()
    }
}

/// Renders one line per device from a tera template
pub struct LineFormatter {
    tera: Tera,
}

impl LineFormatter {
    pub fn new(template: &str) -> Result<Self, FormatError> {
        let mut tera = Tera::default();
        tera.register_filter("condense", filters::condense);
        tera.register_filter("abbrev", filters::abbrev);
        tera.register_filter("dash", filters::dash);
        tera.register_filter("pad", filters::pad);
        tera.register_filter("human_bytes", filters::human_bytes);
        tera.register_filter("human_bytes_iec", filters::human_bytes_iec);
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self { tera })
    }

    /// Render one device; newlines are removed from the output.
    pub fn render(&self, device: &ResolvedDevice) -> Result<String, FormatError> {
        let context = Context::from_serialize(DisplayRow::new(device))?;
        let output = self.tera.render(TEMPLATE_NAME, &context)?;
        Ok(output.replace('\n', ""))
    }

    /// Render every device in order. With `unique`, two devices rendering to
    /// the same line is an error, since the line could not be mapped back.
    pub fn render_all<'a>(
        &self,
        devices: &[&'a ResolvedDevice],
        unique: bool,
    ) -> Result<Rendered<'a>, FormatError> {
        let mut lines = Vec::with_capacity(devices.len());
        let mut by_line = HashMap::with_capacity(devices.len());

        for &device in devices {
            let line = self.render(device)?;
            if unique && by_line.contains_key(&line) {
                return Err(FormatError::DuplicateLine(line));
            }
            by_line.insert(line.clone(), device);
            lines.push(line);
        }

        Ok(Rendered { lines, by_line })
    }
}

/// Pretty JSON indented with tabs.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}
