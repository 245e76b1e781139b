//! Brazilian Portuguese navigation labels.

/// Sidebar labels in menu order.
pub const ENTRIES: &[(&str, &str)] = &[
    ("startHere", "Comece Aqui"),
    ("getting-started", "Introdução"),
    ("install", "Instalação"),
    ("editor-setup", "Configuração do Editor"),
    ("guides/migrate-to-astro", "Migre para o Astro"),
    ("migrate", "Guia de Migração"),
    ("coreConcepts", "Principais Conceitos"),
    ("concepts/why-astro", "Por que Astro?"),
    ("concepts/islands", "Ilhas Astro"),
    ("concepts/mpa-vs-spa", "MPA vs. SPA"),
    ("basics", "Fundamentos"),
    ("core-concepts/project-structure", "Estrutura de Projetos"),
    ("core-concepts/astro-components", "Componentes Astro"),
    ("core-concepts/astro-pages", "Páginas"),
    ("core-concepts/layouts", "Layouts"),
    ("guides/markdown-content", "Markdown e MDX"),
    ("core-concepts/routing", "Roteamento"),
    ("guides/deploy", "Deploy"),
    ("features", "Guias"),
    ("guides/styling", "Estilização e CSS"),
    ("core-concepts/framework-components", "Frameworks de UI"),
    ("guides/imports", "Importações"),
    ("guides/integrations-guide", "Integrações"),
    ("guides/server-side-rendering", "Renderização no lado do Servidor (SSR)"),
    ("guides/data-fetching", "Busca de Dados"),
    ("guides/publish-to-npm", "Publique no NPM"),
    ("core-concepts/sharing-state", "Compartilhamento de Estado"),
    ("guides/rss", "RSS"),
    ("guides/troubleshooting", "Solução de Problemas"),
    ("guides/cms", "Conectando um CMS"),
    ("guides/images", "Imagens"),
    ("guides/fonts", "Fontes"),
    ("guides/testing", "Testes"),
    ("guides/client-side-scripts", "Scripts & Manipulação de Eventos"),
    ("configuration", "Configuração"),
    ("guides/configuring-astro", "O Arquivo de Configuração Astro"),
    ("guides/typescript", "TypeScript"),
    ("guides/aliases", "Atalhos de Importação"),
    ("guides/environment-variables", "Variáveis de Ambiente"),
    ("reference", "Referência"),
    ("reference/directives-reference", "Diretivas de Template"),
    ("reference/adapter-reference", "API de Adaptadores"),
    ("reference/integrations-reference", "API de Integrações"),
    ("reference/cli-reference", "Interface de Linha de Comando"),
    ("reference/api-reference", "API de Runtime"),
    ("reference/configuration-reference", "Configuração"),
    ("reference/error-reference", "Referência de Erros"),
];
