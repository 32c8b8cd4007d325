//! Foundation 5 component table.

use super::Component;

/// Vendor scripts left out of the `foundation_only` group.
pub const VENDOR_LIBRARIES: &[&str] =
    &["modernizr", "jquery", "fastclick", "placeholder", "jquery-cookie"];

/// Components in load order.
///
/// Vendor libraries come first (the framework core needs jQuery), then the
/// core, then widgets. `grid` and `type` precede anything using their mixins.
pub(super) fn components() -> Vec<Component> {
    vec![
        Component::vendor("modernizr").with_js(["modernizr"]),
        Component::vendor("jquery").with_js(["jquery"]),
        Component::vendor("fastclick").with_js(["fastclick"]),
        Component::vendor("placeholder").with_js(["placeholder"]),
        Component::vendor("jquery-cookie").with_js(["jquery.cookie"]).optional(),
        Component::core("core").with_js(["foundation"]).with_sass(["global"]),
        Component::framework("grid").with_sass(["grid"]),
        Component::framework("block-grid").with_sass(["block-grid"]),
        Component::framework("type").with_sass(["type"]),
        Component::framework("visibility").with_sass(["visibility"]),
        Component::framework("buttons").with_sass(["buttons", "button-groups", "split-buttons"]),
        Component::framework("forms").with_sass(["forms"]),
        Component::framework("abide").with_js(["abide"]),
        Component::framework("accordion").with_js(["accordion"]).with_sass(["accordion"]),
        Component::framework("alert").with_js(["alert"]).with_sass(["alert-boxes"]),
        Component::framework("breadcrumbs").with_sass(["breadcrumbs"]),
        Component::framework("clearing").with_js(["clearing"]).with_sass(["clearing"]),
        Component::framework("dropdown")
            .with_js(["dropdown"])
            .with_sass(["dropdown", "dropdown-buttons"]),
        Component::framework("equalizer").with_js(["equalizer"]),
        Component::framework("flex-video").with_sass(["flex-video"]),
        Component::framework("inline-lists").with_sass(["inline-lists"]),
        Component::framework("interchange").with_js(["interchange"]),
        Component::framework("joyride").with_js(["joyride"]).with_sass(["joyride"]),
        Component::framework("keystrokes").with_sass(["keystrokes"]),
        Component::framework("labels").with_sass(["labels"]),
        Component::framework("magellan").with_js(["magellan"]).with_sass(["magellan"]),
        Component::framework("offcanvas").with_js(["offcanvas"]).with_sass(["offcanvas"]),
        Component::framework("orbit").with_js(["orbit"]).with_sass(["orbit"]),
        Component::framework("pagination").with_sass(["pagination"]),
        Component::framework("panels").with_sass(["panels"]),
        Component::framework("pricing-tables").with_sass(["pricing-tables"]),
        Component::framework("progress-bars").with_sass(["progress-bars"]),
        Component::framework("nav").with_sass(["side-nav", "sub-nav"]),
        Component::framework("reveal").with_js(["reveal"]).with_sass(["reveal"]),
        Component::framework("slider").with_js(["slider"]),
        Component::framework("switches").with_sass(["switches"]),
        Component::framework("tables").with_sass(["tables"]),
        Component::framework("tabs").with_js(["tab"]).with_sass(["tabs"]),
        Component::framework("thumbs").with_sass(["thumbs"]),
        Component::framework("tooltips").with_js(["tooltip"]).with_sass(["tooltips"]),
        Component::framework("topbar").with_js(["topbar"]).with_sass(["top-bar"]),
        Component::vendor("foundation-icons").with_sass(["foundation-icons"]).optional(),
    ]
}
