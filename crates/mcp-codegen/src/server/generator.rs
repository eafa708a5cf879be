//! Python MCP server generator.
//!
//! Turns described methods into a stub server for the Python `mcp` package:
//!
//! - `mcp_server.py`: handlers, per-group registry shards, the merged
//!   `TOOL_REGISTRY`, the schema table, and stdio wiring
//! - `tools.json`: machine-readable manifest
//! - `requirements.txt`, `example_usage.py`, `README.md`
//! - `tests/test_group_NN.py` per tool group, when tests are enabled
//!
//! Output is a pure function of the described methods and the
//! configuration. Nothing time- or environment-dependent is embedded.
//!
//! # Examples
//!
//! ```
//! use mcp_sdkgen_codegen::describe::HeuristicDescriber;
//! use mcp_sdkgen_codegen::server::ServerGenerator;
//! use mcp_sdkgen_core::{ConversionConfig, DiscoveredMethod, Parameter};
//!
//! let method = DiscoveredMethod::new("sdk.Widget", "get_widget")
//!     .with_parameters(vec![Parameter::required("id")]);
//! let described = HeuristicDescriber::new().describe(&method);
//! let config = ConversionConfig::builder("widgets", "sdk", "out").build().unwrap();
//!
//! let generator = ServerGenerator::new().unwrap();
//! let server = generator.generate(&[described], &config).unwrap();
//!
//! assert_eq!(server.tool_count(), 1);
//! let main = server.code.file("mcp_server.py").unwrap();
//! assert!(main.content().contains("async def handle_get_widget("));
//! ```

use super::naming::assign_tool_names;
use super::schema::{input_schema, schema_type};
use super::types::{GeneratedServer, GeneratedTool, ToolManifest};
use crate::common::python;
use crate::common::{GeneratedCode, GeneratedFile};
use crate::template_engine::TemplateEngine;
use mcp_sdkgen_core::{ConversionConfig, DescribedMethod, Error, Parameter, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Primary server source file.
pub const SERVER_FILE: &str = "mcp_server.py";
/// Tool manifest file.
pub const MANIFEST_FILE: &str = "tools.json";

#[derive(Debug, Serialize)]
struct HandlerParameter {
    name_py: String,
    required: bool,
}

#[derive(Debug, Serialize)]
struct HandlerContext {
    tool_name: String,
    tool_name_py: String,
    description_doc: String,
    qualified_name_doc: String,
    qualified_name_py: String,
    category_doc: String,
    message_py: String,
    parameters: Vec<HandlerParameter>,
}

#[derive(Debug, Serialize)]
struct ServerTool {
    tool_name: String,
    tool_name_py: String,
    handler_body: String,
    description_py: String,
    category_py: String,
    input_schema_py: String,
}

#[derive(Debug, Serialize)]
struct ServerGroup {
    number: usize,
    tool_count: usize,
    tools: Vec<ServerTool>,
}

#[derive(Debug, Serialize)]
struct ServerContext {
    sdk_title: String,
    sdk_title_doc: String,
    sdk_module_doc: String,
    server_name_py: String,
    auth_class: String,
    token_env_py: String,
    api_key_env_py: String,
    tool_count: usize,
    group_count: usize,
    groups: Vec<ServerGroup>,
}

#[derive(Debug, Serialize)]
struct ExampleTool {
    tool_name: String,
    tool_name_py: String,
    arguments_py: String,
}

#[derive(Debug, Serialize)]
struct ExampleContext {
    sdk_title_doc: String,
    example: Option<ExampleTool>,
}

#[derive(Debug, Serialize)]
struct TestTool {
    tool_name_py: String,
    minimal_arguments_py: String,
}

#[derive(Debug, Serialize)]
struct TestGroupContext {
    number: usize,
    sdk_title_doc: String,
    tools: Vec<TestTool>,
}

#[derive(Debug, Serialize)]
struct CategoryRow {
    name: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ReadmeTool {
    tool_name: String,
    category_md: String,
    description_md: String,
    qualified_name: String,
}

#[derive(Debug, Serialize)]
struct ReadmeContext {
    sdk_title: String,
    sdk_module: String,
    token_env: String,
    api_key_env: String,
    tool_count: usize,
    categories: Vec<CategoryRow>,
    tools: Vec<ReadmeTool>,
}

#[derive(Debug, Serialize)]
struct RequirementsContext<'a> {
    package: &'a str,
    include_pytest: bool,
}

/// Naming derived from the SDK label.
#[derive(Debug)]
struct SdkNames {
    title: String,
    title_doc: String,
    server_name: String,
    auth_class: String,
    token_env: String,
    api_key_env: String,
}

impl SdkNames {
    fn new(sdk_name: &str) -> Self {
        let title = python::single_line(sdk_name);
        let env_prefix = python::to_env_prefix(sdk_name);
        Self {
            title_doc: python::docstring(&title),
            server_name: format!("{}-mcp", env_prefix.to_ascii_lowercase().replace('_', "-")),
            auth_class: format!("{}AuthManager", python::to_pascal_case(sdk_name)),
            token_env: format!("{env_prefix}_TOKEN"),
            api_key_env: format!("{env_prefix}_API_KEY"),
            title,
        }
    }
}

/// Generator for Python MCP server stubs.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing safe use across threads.
#[derive(Debug)]
pub struct ServerGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl ServerGenerator<'_> {
    /// Creates a new generator with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Generates the server files for a sequence of described methods.
    ///
    /// Tool order follows the input order. Tools are split into groups of
    /// `max_methods_per_tool_group`; without a cap every tool lands in one
    /// group.
    ///
    /// # Errors
    ///
    /// Returns `NameCollision` if two methods still share a tool name after
    /// disambiguation, or `SerializationError` if rendering fails.
    pub fn generate(
        &self,
        methods: &[DescribedMethod],
        config: &ConversionConfig,
    ) -> Result<GeneratedServer> {
        tracing::info!(
            "Generating MCP server for {} ({} methods)",
            config.sdk_name,
            methods.len()
        );

        let names = assign_tool_names(methods)?;
        let group_size = config
            .max_methods_per_tool_group
            .unwrap_or(methods.len())
            .max(1);

        let tools: Vec<GeneratedTool> = methods
            .iter()
            .zip(names)
            .enumerate()
            .map(|(index, (described, name))| GeneratedTool {
                name,
                qualified_name: described.method.qualified_name(),
                category: described.category.clone(),
                description: python::single_line(&described.description),
                source: described.source,
                input_schema: input_schema(&described.method.parameters),
                group: index / group_size + 1,
            })
            .collect();
        let group_count = tools.len().div_ceil(group_size);

        let sdk = SdkNames::new(&config.sdk_name);
        let mut code = GeneratedCode::new();

        code.add_file(GeneratedFile::new(
            SERVER_FILE,
            self.render_server(&tools, methods, group_size, group_count, &sdk, config)?,
        ));
        code.add_file(GeneratedFile::new(
            MANIFEST_FILE,
            render_manifest(&tools, group_count, config)?,
        ));
        code.add_file(GeneratedFile::new(
            "requirements.txt",
            self.engine.render(
                "server/requirements",
                &RequirementsContext {
                    package: config.package_name(),
                    include_pytest: config.generate_tests,
                },
            )?,
        ));
        code.add_file(GeneratedFile::new(
            "example_usage.py",
            self.render_example(&tools, methods, &sdk)?,
        ));
        code.add_file(GeneratedFile::new(
            "README.md",
            self.render_readme(&tools, &sdk, config)?,
        ));

        if config.generate_tests {
            for (number, chunk) in (1..).zip(tools.chunks(group_size)) {
                let start = (number - 1) * group_size;
                let sources = &methods[start..start + chunk.len()];
                let context = TestGroupContext {
                    number,
                    sdk_title_doc: sdk.title_doc.clone(),
                    tools: chunk
                        .iter()
                        .zip(sources)
                        .map(|(tool, described)| TestTool {
                            tool_name_py: python::string(tool.name.as_str()),
                            minimal_arguments_py: minimal_arguments_py(
                                &described.method.parameters,
                            ),
                        })
                        .collect(),
                };
                let path = format!("tests/test_group_{number:02}.py");
                tracing::debug!("Generated {}", path);
                code.add_file(GeneratedFile::new(
                    path,
                    self.engine.render("server/test_group", &context)?,
                ));
            }
        }

        tracing::info!(
            "Generated {} tools in {} groups ({} files)",
            tools.len(),
            group_count,
            code.file_count()
        );

        Ok(GeneratedServer {
            tools,
            group_count,
            code,
        })
    }

    fn render_handler(&self, tool: &GeneratedTool, described: &DescribedMethod) -> Result<String> {
        let context = HandlerContext {
            tool_name: tool.name.to_string(),
            tool_name_py: python::string(tool.name.as_str()),
            description_doc: python::docstring(&tool.description),
            qualified_name_doc: python::docstring(&tool.qualified_name),
            qualified_name_py: python::string(&tool.qualified_name),
            category_doc: python::docstring(&python::single_line(&tool.category)),
            message_py: python::string(&tool.description),
            parameters: described
                .method
                .parameters
                .iter()
                .map(|p| HandlerParameter {
                    name_py: python::string(&p.name),
                    required: p.required,
                })
                .collect(),
        };
        let body = self.engine.render("server/handler", &context)?;
        Ok(body.trim_end().to_string())
    }

    fn render_server(
        &self,
        tools: &[GeneratedTool],
        methods: &[DescribedMethod],
        group_size: usize,
        group_count: usize,
        sdk: &SdkNames,
        config: &ConversionConfig,
    ) -> Result<String> {
        let mut groups = Vec::with_capacity(group_count);
        for (number, (chunk, sources)) in
            (1..).zip(tools.chunks(group_size).zip(methods.chunks(group_size)))
        {
            let mut server_tools = Vec::with_capacity(chunk.len());
            for (tool, described) in chunk.iter().zip(sources) {
                server_tools.push(ServerTool {
                    tool_name: tool.name.to_string(),
                    tool_name_py: python::string(tool.name.as_str()),
                    handler_body: self.render_handler(tool, described)?,
                    description_py: python::string(&tool.description),
                    category_py: python::string(&tool.category),
                    input_schema_py: python::literal(&tool.input_schema),
                });
            }
            groups.push(ServerGroup {
                number,
                tool_count: server_tools.len(),
                tools: server_tools,
            });
        }

        let context = ServerContext {
            sdk_title: sdk.title_doc.clone(),
            sdk_title_doc: sdk.title_doc.clone(),
            sdk_module_doc: python::docstring(&config.sdk_module),
            server_name_py: python::string(&sdk.server_name),
            auth_class: sdk.auth_class.clone(),
            token_env_py: python::string(&sdk.token_env),
            api_key_env_py: python::string(&sdk.api_key_env),
            tool_count: tools.len(),
            group_count,
            groups,
        };
        self.engine.render("server/mcp_server", &context)
    }

    fn render_example(
        &self,
        tools: &[GeneratedTool],
        methods: &[DescribedMethod],
        sdk: &SdkNames,
    ) -> Result<String> {
        let example = tools.first().zip(methods.first()).map(|(tool, described)| ExampleTool {
            tool_name: tool.name.to_string(),
            tool_name_py: python::string(tool.name.as_str()),
            arguments_py: minimal_arguments_py(&described.method.parameters),
        });
        self.engine.render(
            "server/example_usage",
            &ExampleContext {
                sdk_title_doc: sdk.title_doc.clone(),
                example,
            },
        )
    }

    fn render_readme(
        &self,
        tools: &[GeneratedTool],
        sdk: &SdkNames,
        config: &ConversionConfig,
    ) -> Result<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tool in tools {
            *counts.entry(tool.category.as_str()).or_default() += 1;
        }

        let context = ReadmeContext {
            sdk_title: sdk.title.clone(),
            sdk_module: config.sdk_module.clone(),
            token_env: sdk.token_env.clone(),
            api_key_env: sdk.api_key_env.clone(),
            tool_count: tools.len(),
            categories: counts
                .into_iter()
                .map(|(name, count)| CategoryRow {
                    name: markdown_cell(name),
                    count,
                })
                .collect(),
            tools: tools
                .iter()
                .map(|tool| ReadmeTool {
                    tool_name: tool.name.to_string(),
                    category_md: markdown_cell(&tool.category),
                    description_md: markdown_cell(&tool.description),
                    qualified_name: tool.qualified_name.clone(),
                })
                .collect(),
        };
        self.engine.render("server/readme", &context)
    }
}

fn render_manifest(
    tools: &[GeneratedTool],
    group_count: usize,
    config: &ConversionConfig,
) -> Result<String> {
    let manifest = ToolManifest {
        sdk_name: config.sdk_name.clone(),
        sdk_module: config.sdk_module.clone(),
        tool_count: tools.len(),
        group_count,
        tools: tools.to_vec(),
    };
    let mut json = serde_json::to_string_pretty(&manifest).map_err(|e| Error::SerializationError {
        message: format!("Failed to serialize tool manifest: {e}"),
        source: Some(e),
    })?;
    json.push('\n');
    Ok(json)
}

/// Renders a Python dict literal holding a plausible value for every
/// required parameter.
fn minimal_arguments_py(parameters: &[Parameter]) -> String {
    let arguments: Map<String, Value> = parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| {
            let value = match schema_type(p.declared_type.as_deref()) {
                "number" => Value::from(1),
                "boolean" => Value::Bool(true),
                "object" => Value::Object(Map::new()),
                "array" => Value::Array(Vec::new()),
                _ => Value::from("test"),
            };
            (p.name.clone(), value)
        })
        .collect();
    python::literal(&Value::Object(arguments))
}

fn markdown_cell(text: &str) -> String {
    python::single_line(text).replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::HeuristicDescriber;
    use mcp_sdkgen_core::DiscoveredMethod;
    use serde_json::json;

    fn config() -> ConversionConfig {
        ConversionConfig::builder("Widget Co", "sdk", "out")
            .build()
            .unwrap()
    }

    fn described(owner: &str, name: &str, parameters: Vec<Parameter>) -> DescribedMethod {
        HeuristicDescriber::new()
            .describe(&DiscoveredMethod::new(owner, name).with_parameters(parameters))
    }

    #[test]
    fn test_sdk_names() {
        let names = SdkNames::new("Widget Co");
        assert_eq!(names.auth_class, "WidgetCoAuthManager");
        assert_eq!(names.token_env, "WIDGET_CO_TOKEN");
        assert_eq!(names.api_key_env, "WIDGET_CO_API_KEY");
        assert_eq!(names.server_name, "widget-co-mcp");
    }

    #[test]
    fn test_minimal_arguments_by_type() {
        let params = vec![
            Parameter::required("name"),
            Parameter::required("count").with_type("int"),
            Parameter::required("force").with_type("bool"),
            Parameter::required("labels").with_type("List[str]"),
            Parameter::required("body").with_type("dict"),
            Parameter::optional("page", Some(json!(1))),
        ];
        let rendered = minimal_arguments_py(&params);
        assert!(rendered.contains(r#""name": "test""#));
        assert!(rendered.contains(r#""count": 1"#));
        assert!(rendered.contains(r#""force": True"#));
        assert!(rendered.contains(r#""labels": []"#));
        assert!(rendered.contains(r#""body": {}"#));
        assert!(!rendered.contains("page"));
    }

    #[test]
    fn test_handler_required_and_optional() {
        let generator = ServerGenerator::new().unwrap();
        let method = described(
            "sdk.Widget",
            "get_widget",
            vec![
                Parameter::required("id"),
                Parameter::optional("verbose", Some(json!(false))),
            ],
        );
        let server = generator.generate(&[method], &config()).unwrap();
        let main = server.code.file(SERVER_FILE).unwrap().content();

        assert!(main.contains(r#""id": require(params, "id"),"#));
        assert!(main.contains(r#""verbose": params.get("verbose"),"#));
        assert!(main.contains(r#"return error_result("get_widget", str(exc))"#));
        assert!(main.contains("class WidgetCoAuthManager:"));
        assert!(main.contains(r#"TOKEN_ENV = "WIDGET_CO_TOKEN""#));
    }

    #[test]
    fn test_groups_and_test_files() {
        let generator = ServerGenerator::new().unwrap();
        let methods: Vec<_> = (0..5)
            .map(|i| described("sdk.Api", &format!("get_item_{i}"), vec![]))
            .collect();
        let config = ConversionConfig::builder("sdk", "sdk", "out")
            .max_methods_per_tool_group(Some(2))
            .build()
            .unwrap();

        let server = generator.generate(&methods, &config).unwrap();
        assert_eq!(server.group_count, 3);
        let groups: Vec<_> = server.tools.iter().map(|t| t.group).collect();
        assert_eq!(groups, vec![1, 1, 2, 2, 3]);

        let main = server.code.file(SERVER_FILE).unwrap().content();
        for n in 1..=3 {
            assert!(main.contains(&format!("    **TOOL_GROUP_{n},")));
        }
        assert!(server.code.file("tests/test_group_01.py").is_some());
        assert!(server.code.file("tests/test_group_03.py").is_some());
        assert!(server.code.file("tests/test_group_04.py").is_none());

        let third = server.code.file("tests/test_group_03.py").unwrap().content();
        assert!(third.contains("mcp_server.TOOL_GROUP_3"));
        assert!(third.contains(r#""get_item_4""#));
    }

    #[test]
    fn test_no_tests_when_disabled() {
        let generator = ServerGenerator::new().unwrap();
        let config = ConversionConfig::builder("sdk", "sdk", "out")
            .generate_tests(false)
            .build()
            .unwrap();
        let server = generator
            .generate(&[described("sdk.A", "get_a", vec![])], &config)
            .unwrap();

        assert!(server.code.files().all(|f| !f.path().starts_with("tests/")));
        let requirements = server.code.file("requirements.txt").unwrap().content();
        assert!(!requirements.contains("pytest"));
        assert!(requirements.contains("sdk\n"));
    }

    #[test]
    fn test_zero_tools() {
        let generator = ServerGenerator::new().unwrap();
        let server = generator.generate(&[], &config()).unwrap();
        assert_eq!(server.tool_count(), 0);
        assert_eq!(server.group_count, 0);

        let main = server.code.file(SERVER_FILE).unwrap().content();
        assert!(main.contains("TOOL_REGISTRY: Dict[str, ToolHandler] = {\n}"));
        let example = server.code.file("example_usage.py").unwrap().content();
        assert!(!example.contains("arguments ="));
    }

    #[test]
    fn test_hostile_text_is_escaped() {
        let generator = ServerGenerator::new().unwrap();
        let mut method = described("sdk.A", "get_a", vec![]);
        method.description = "Returns \"\"\" and a | pipe\\".to_string();
        let server = generator.generate(&[method], &config()).unwrap();

        let main = server.code.file(SERVER_FILE).unwrap().content();
        assert!(main.contains(r#""""Returns \"\"\" and a | pipe\\"#));
        assert!(main.contains(r#""description": "Returns \"\"\" and a | pipe\\","#));

        let readme = server.code.file("README.md").unwrap().content();
        assert!(readme.contains(r"a \| pipe"));
    }

    #[test]
    fn test_manifest() {
        let generator = ServerGenerator::new().unwrap();
        let server = generator
            .generate(
                &[described("sdk.A", "get_a", vec![Parameter::required("id")])],
                &config(),
            )
            .unwrap();
        let manifest: ToolManifest =
            serde_json::from_str(server.code.file(MANIFEST_FILE).unwrap().content()).unwrap();

        assert_eq!(manifest.tool_count, 1);
        assert_eq!(manifest.tools, server.tools);
        assert_eq!(manifest.tools[0].required_parameters(), vec!["id"]);
    }
}
