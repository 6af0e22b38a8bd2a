// Built-in technology catalogue. Seeded into the database on first start and
// used as the fallback when no persisted snapshot exists.

pub const REGISTRY_VERSION: &str = "1.0.0";

type Subcategories = &'static [(&'static str, &'static [&'static str])];

pub const BUILTIN_CATEGORIES: &[(&str, Subcategories)] = &[
    (
        "frontend",
        &[
            (
                "frameworks",
                &[
                    "React",
                    "Vue.js",
                    "Angular",
                    "Svelte",
                    "Next.js",
                    "Nuxt.js",
                    "SvelteKit",
                    "Remix",
                    "Solid.js",
                ],
            ),
            (
                "stateManagement",
                &[
                    "Redux", "Zustand", "MobX", "Recoil", "Pinia", "Vuex", "NgRx", "Akita",
                ],
            ),
            (
                "uiLibraries",
                &[
                    "Material UI",
                    "Chakra UI",
                    "Ant Design",
                    "Tailwind CSS",
                    "Bootstrap",
                    "Vuetify",
                    "Element Plus",
                    "Quasar",
                    "Angular Material",
                    "PrimeNG",
                    "shadcn/ui",
                ],
            ),
            (
                "formHandling",
                &[
                    "React Hook Form",
                    "Formik",
                    "VeeValidate",
                    "FormKit",
                    "Reactive Forms",
                ],
            ),
            ("languages", &["TypeScript", "JavaScript"]),
            ("buildTools", &["Vite", "Webpack", "esbuild", "Parcel"]),
        ],
    ),
    (
        "backend",
        &[
            (
                "frameworks",
                &[
                    "Express.js",
                    "NestJS",
                    "Fastify",
                    "Django",
                    "Flask",
                    "FastAPI",
                    "Spring Boot",
                    "Ruby on Rails",
                    "Laravel",
                    "ASP.NET Core",
                    "Gin",
                    "Axum",
                    "Actix Web",
                ],
            ),
            (
                "languages",
                &[
                    "Node.js", "Python", "Java", "Go", "Rust", "Ruby", "PHP", "C#",
                ],
            ),
            (
                "orms",
                &[
                    "Prisma",
                    "TypeORM",
                    "Sequelize",
                    "Mongoose",
                    "Django ORM",
                    "SQLAlchemy",
                    "Tortoise ORM",
                    "Hibernate",
                    "Entity Framework",
                    "Diesel",
                    "SQLx",
                ],
            ),
            (
                "authFrameworks",
                &[
                    "Passport.js",
                    "JWT",
                    "Django Auth",
                    "Django REST Framework",
                    "FastAPI Users",
                    "OAuth2",
                    "Spring Security",
                ],
            ),
            ("apiStyles", &["REST", "GraphQL", "gRPC", "tRPC", "WebSocket"]),
        ],
    ),
    (
        "database",
        &[
            (
                "sql",
                &[
                    "PostgreSQL",
                    "MySQL",
                    "SQLite",
                    "MariaDB",
                    "Microsoft SQL Server",
                    "CockroachDB",
                ],
            ),
            (
                "nosql",
                &[
                    "MongoDB",
                    "DynamoDB",
                    "Cassandra",
                    "Couchbase",
                    "Firestore",
                ],
            ),
            ("cache", &["Redis", "Memcached"]),
            ("search", &["Elasticsearch", "OpenSearch", "Meilisearch", "Algolia"]),
        ],
    ),
    (
        "authentication",
        &[
            (
                "providers",
                &[
                    "Auth0",
                    "Firebase Authentication",
                    "AWS Cognito",
                    "Clerk",
                    "Supabase Auth",
                    "Okta",
                    "Keycloak",
                ],
            ),
            (
                "methods",
                &[
                    "Email/Password",
                    "OAuth",
                    "Magic Link",
                    "SSO",
                    "Multi-factor Authentication",
                    "Passkeys",
                ],
            ),
        ],
    ),
    (
        "deployment",
        &[
            (
                "platforms",
                &[
                    "Vercel",
                    "Netlify",
                    "Heroku",
                    "Render",
                    "Fly.io",
                    "Railway",
                    "AWS",
                    "Google Cloud",
                    "Azure",
                    "DigitalOcean",
                ],
            ),
            ("containerization", &["Docker", "Kubernetes", "Podman"]),
            (
                "ciCd",
                &["GitHub Actions", "GitLab CI", "CircleCI", "Jenkins"],
            ),
        ],
    ),
    (
        "testing",
        &[
            ("unit", &["Jest", "Vitest", "Mocha", "Pytest", "JUnit"]),
            ("e2e", &["Cypress", "Playwright", "Selenium"]),
            ("component", &["React Testing Library", "Vue Test Utils", "Storybook"]),
        ],
    ),
    (
        "storage",
        &[
            (
                "objectStorage",
                &[
                    "Amazon S3",
                    "Google Cloud Storage",
                    "Azure Blob Storage",
                    "Cloudflare R2",
                    "MinIO",
                ],
            ),
            ("cdn", &["Cloudflare", "CloudFront", "Fastly"]),
        ],
    ),
    (
        "serverless",
        &[
            (
                "functions",
                &[
                    "AWS Lambda",
                    "Google Cloud Functions",
                    "Azure Functions",
                    "Cloudflare Workers",
                    "Vercel Functions",
                ],
            ),
            ("backendAsAService", &["Firebase", "Supabase", "Appwrite"]),
        ],
    ),
];
