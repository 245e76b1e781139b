//! English navigation labels.
//!
//! This table defines the canonical key set every other locale is checked against.

pub const ENTRIES: &[(&str, &str)] = &[
    ("startHere", "Start Here"),
    ("getting-started", "Getting Started"),
    ("install", "Installation"),
    ("editor-setup", "Editor Setup"),
    ("guides/migrate-to-astro", "Migrate to Astro"),
    ("migrate", "Migration Guide"),
    ("coreConcepts", "Core Concepts"),
    ("concepts/why-astro", "Why Astro"),
    ("concepts/islands", "Astro Islands"),
    ("concepts/mpa-vs-spa", "MPA vs. SPA"),
    ("basics", "Basics"),
    ("core-concepts/project-structure", "Project Structure"),
    ("core-concepts/astro-components", "Components"),
    ("core-concepts/astro-pages", "Pages"),
    ("core-concepts/layouts", "Layouts"),
    ("guides/markdown-content", "Markdown & MDX"),
    ("core-concepts/routing", "Routing"),
    ("guides/deploy", "Deploy"),
    ("features", "Guides"),
    ("guides/styling", "Styling & CSS"),
    ("core-concepts/framework-components", "UI Frameworks"),
    ("guides/imports", "Imports"),
    ("guides/integrations-guide", "Integrations"),
    ("guides/server-side-rendering", "Server-side Rendering (SSR)"),
    ("guides/data-fetching", "Data Fetching"),
    ("guides/publish-to-npm", "Publish to NPM"),
    ("core-concepts/sharing-state", "Sharing State"),
    ("guides/rss", "RSS"),
    ("guides/troubleshooting", "Troubleshooting"),
    ("guides/cms", "Connect a CMS"),
    ("guides/images", "Images"),
    ("guides/fonts", "Fonts"),
    ("guides/testing", "Testing"),
    ("guides/client-side-scripts", "Scripts & Event Handling"),
    ("configuration", "Configuration"),
    ("guides/configuring-astro", "The Astro Configuration File"),
    ("guides/typescript", "TypeScript"),
    ("guides/aliases", "Import Aliases"),
    ("guides/environment-variables", "Environment Variables"),
    ("reference", "Reference"),
    ("reference/directives-reference", "Template Directives"),
    ("reference/adapter-reference", "Adapter API"),
    ("reference/integrations-reference", "Integrations API"),
    ("reference/cli-reference", "Command-line Interface"),
    ("reference/api-reference", "Runtime API"),
    ("reference/configuration-reference", "Configuration"),
    ("reference/error-reference", "Error Reference"),
];
