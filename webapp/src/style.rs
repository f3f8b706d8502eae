use constcat::concat;

// static application styles
//
// anything themeable reads the custom properties the ThemeProvider injects, so these rules
// never hard-code a color the theme owns

const RESET: &str = r#"
* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
  color: var(--colors-fg-default);
  background-color: var(--colors-bg-default);
  line-height: 1.5;
}

a {
  text-decoration: none;
}
"#;

const SHELL: &str = r#"
.app-header {
  box-shadow: 0 1px 2px 0 rgba(0, 0, 0, 0.05);
}

.nav-actions {
  display: flex;
  gap: var(--spacing-2);
  align-items: center;
}

.page-content {
  padding: var(--spacing-6) var(--spacing-4);
}

.section-title {
  font-size: var(--font-sizes-2xl);
  font-weight: var(--font-weights-semibold);
  margin-bottom: var(--spacing-4);
}

.user-menu {
  position: relative;
}

.user-menu-items {
  position: absolute;
  right: 0;
  margin-top: var(--spacing-2);
  min-width: 10rem;
  list-style: none;
  background-color: var(--colors-bg-default);
  color: var(--colors-fg-default);
  border: 1px solid var(--colors-bg-emphasized);
  border-radius: var(--radii-md);
  box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
}

.user-menu-items a {
  display: block;
  padding: var(--spacing-2) var(--spacing-3);
  color: inherit;
}

.user-menu-items a:hover {
  background-color: var(--colors-bg-muted);
}
"#;

const PAGES: &str = r#"
.hero {
  padding: var(--spacing-8) 0;
}

.hero-title {
  font-size: var(--font-sizes-2xl);
  font-weight: var(--font-weights-bold);
  color: var(--colors-ui-main);
}

.hero-subtitle {
  color: var(--colors-fg-muted);
  margin-bottom: var(--spacing-6);
}

.settings table {
  border-collapse: collapse;
  margin-bottom: var(--spacing-6);
}

.settings td, .settings th {
  border: 1px solid var(--colors-bg-emphasized);
  padding: var(--spacing-2);
  text-align: left;
}

.settings tr.current {
  background-color: var(--colors-bg-muted);
}

.swatch {
  display: inline-block;
  width: 1.5rem;
  height: 1.5rem;
  border-radius: var(--radii-sm);
  border: 1px solid var(--colors-bg-emphasized);
}
"#;

pub const APP_STYLES: &str = concat!(RESET, SHELL, PAGES);
