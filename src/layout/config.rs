/// Configuration for region layout and markup output.
///
/// # Examples
///
/// ```rust
/// use sheetgrid::layout::LayoutOptions;
///
/// // Create with defaults
/// let options = LayoutOptions::default();
/// assert_eq!(options.scale, 1.0);
///
/// // Or customize
/// let options = LayoutOptions::new()
///     .with_scale(0.75)
///     .with_container_id("plan")
///     .with_css_class("box");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Factor applied to every coordinate and size
    pub scale: f64,
    /// Prefix of every region's element id
    pub container_id: String,
    /// CSS class put on every region
    pub css_class: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            container_id: "sheet".to_string(),
            css_class: "cell".to_string(),
        }
    }
}

impl LayoutOptions {
    /// Create a new `LayoutOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sheetgrid::layout::LayoutOptions;
    ///
    /// let options = LayoutOptions::new().with_scale(2.0);
    /// assert_eq!(options.scale, 2.0);
    /// ```
    #[inline]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the element id prefix.
    #[inline]
    pub fn with_container_id<S: Into<String>>(mut self, container_id: S) -> Self {
        self.container_id = container_id.into();
        self
    }

    /// Set the CSS class of every region.
    #[inline]
    pub fn with_css_class<S: Into<String>>(mut self, css_class: S) -> Self {
        self.css_class = css_class.into();
        self
    }
}
