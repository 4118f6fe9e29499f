use std::collections::BTreeMap;

use crate::error::{WmError, WmResult};
use crate::geometry::Size;

use super::WindowId;

/// Static description of one content window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub id: WindowId,
    pub title: String,
    pub size: Size,
    pub visible: bool,
    pub z_index: u32,
}

impl WindowSpec {
    pub fn new(id: u16, title: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: WindowId(id),
            title: title.into(),
            size: Size::new(width, height),
            visible: false,
            z_index: u32::from(id),
        }
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn z_index(mut self, z_index: u32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// The fixed set of windows a desktop is built from.
///
/// Ids and initial z-indices are unique; order is the dock order.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    specs: Vec<WindowSpec>,
}

impl Manifest {
    pub fn new(specs: Vec<WindowSpec>) -> WmResult<Self> {
        if specs.is_empty() {
            return Err(WmError::EmptyManifest);
        }
        let mut by_z: BTreeMap<u32, WindowId> = BTreeMap::new();
        for (idx, spec) in specs.iter().enumerate() {
            if specs[..idx].iter().any(|other| other.id == spec.id) {
                return Err(WmError::DuplicateWindow(spec.id));
            }
            if let Some(first) = by_z.insert(spec.z_index, spec.id) {
                return Err(WmError::DuplicateZIndex {
                    first,
                    second: spec.id,
                    z_index: spec.z_index,
                });
            }
        }
        Ok(Self { specs })
    }

    /// The five portfolio sections. Only the "about" window starts open.
    pub fn portfolio() -> Self {
        Self {
            specs: vec![
                WindowSpec::new(1, "A PROPOS DE MOI", 500.0, 400.0)
                    .visible(true)
                    .z_index(5),
                WindowSpec::new(2, "PARCOURS", 450.0, 350.0).z_index(2),
                WindowSpec::new(3, "COMPETENCES", 550.0, 380.0).z_index(3),
                WindowSpec::new(4, "PROJETS", 600.0, 450.0).z_index(4),
                WindowSpec::new(5, "CONTACT", 400.0, 300.0).z_index(1),
            ],
        }
    }

    pub fn specs(&self) -> &[WindowSpec] {
        &self.specs
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.specs.iter().map(|spec| spec.id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::portfolio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_manifest_is_valid() {
        let portfolio = Manifest::portfolio();
        let rebuilt = Manifest::new(portfolio.specs().to_vec()).expect("valid manifest");
        assert_eq!(rebuilt.len(), 5);
        assert_eq!(
            rebuilt.get(WindowId(1)).map(|spec| spec.size),
            Some(Size::new(500.0, 400.0))
        );
    }

    #[test]
    fn rejects_duplicates() {
        let err = Manifest::new(vec![
            WindowSpec::new(1, "a", 400.0, 300.0),
            WindowSpec::new(1, "b", 400.0, 300.0).z_index(9),
        ])
        .unwrap_err();
        assert_eq!(err, WmError::DuplicateWindow(WindowId(1)));

        let err = Manifest::new(vec![
            WindowSpec::new(1, "a", 400.0, 300.0).z_index(4),
            WindowSpec::new(2, "b", 400.0, 300.0).z_index(4),
        ])
        .unwrap_err();
        assert!(matches!(err, WmError::DuplicateZIndex { z_index: 4, .. }));

        assert_eq!(Manifest::new(Vec::new()), Err(WmError::EmptyManifest));
    }
}
