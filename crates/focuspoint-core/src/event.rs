// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Focus points: the events an application tracks.

use std::collections::BTreeMap;

use crate::error::InvalidEventError;

/// Maximum number of custom variables a single focus point may carry.
pub const MAX_CUSTOM_VARIABLES: usize = 5;

/// Something in the application worth tracking: an application load, a module
/// being opened, a user action, an error.
///
/// Focus points nest. A focus point with a parent is reported under the
/// parent's path, so `FocusPoint::new("Proxy").with_parent(FocusPoint::new("Settings"))`
/// is tracked as `Settings/Proxy`.
///
/// # Example
///
/// ```
/// use focuspoint_core::FocusPoint;
///
/// let focus_point = FocusPoint::new("Checkout")
///     .with_parent(FocusPoint::new("Cart"))
///     .with_category("purchase")
///     .with_custom_variable("plan", "premium");
///
/// assert_eq!(focus_point.path_segments(), vec!["Cart", "Checkout"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusPoint {
	name: String,
	category: Option<String>,
	parent: Option<Box<FocusPoint>>,
	custom_variables: BTreeMap<String, String>,
}

impl FocusPoint {
	/// Creates a focus point with the given name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			category: None,
			parent: None,
			custom_variables: BTreeMap::new(),
		}
	}

	/// Nests this focus point under `parent`.
	pub fn with_parent(mut self, parent: FocusPoint) -> Self {
		self.parent = Some(Box::new(parent));
		self
	}

	/// Sets the category. Categorised focus points are reported as event hits
	/// rather than page views by strategies that distinguish the two.
	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	/// Attaches a custom variable. Setting the same name twice keeps the last value.
	pub fn with_custom_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.custom_variables.insert(name.into(), value.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn category(&self) -> Option<&str> {
		self.category.as_deref()
	}

	pub fn parent(&self) -> Option<&FocusPoint> {
		self.parent.as_deref()
	}

	/// Custom variables ordered by name.
	pub fn custom_variables(&self) -> &BTreeMap<String, String> {
		&self.custom_variables
	}

	/// Returns the chain of focus points from the outermost parent down to `self`.
	pub fn ancestry(&self) -> Vec<&FocusPoint> {
		let mut chain = Vec::new();
		let mut current = Some(self);
		while let Some(point) = current {
			chain.push(point);
			current = point.parent();
		}
		chain.reverse();
		chain
	}

	/// Names along the ancestry, outermost first.
	pub fn path_segments(&self) -> Vec<&str> {
		self.ancestry().into_iter().map(FocusPoint::name).collect()
	}

	/// Checks the structural rules every strategy relies on.
	///
	/// Strategies may impose further restrictions of their own.
	pub fn validate(&self) -> Result<(), InvalidEventError> {
		if self.ancestry().iter().any(|p| p.name.trim().is_empty()) {
			return Err(InvalidEventError::EmptyName);
		}

		if self.custom_variables.len() > MAX_CUSTOM_VARIABLES {
			return Err(InvalidEventError::TooManyCustomVariables {
				count: self.custom_variables.len(),
				max: MAX_CUSTOM_VARIABLES,
			});
		}

		if self.custom_variables.keys().any(|k| k.trim().is_empty()) {
			return Err(InvalidEventError::EmptyCustomVariableName);
		}

		Ok(())
	}
}
