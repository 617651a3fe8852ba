//! End-to-end tests reading C# solutions from disk

use std::fs;
use std::path::Path;

use sharpuml::prelude::*;
use sharpuml::render_solution;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const SOLUTION: &str = r#"
Microsoft Visual Studio Solution File, Format Version 12.00
Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "Core", "src\Core\Core.csproj", "{11111111-1111-1111-1111-111111111111}"
EndProject
Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "Web", "src\Web\Web.csproj", "{22222222-2222-2222-2222-222222222222}"
EndProject
Project("{2150E333-8FDC-42A3-9474-1A3956D46DE8}") = "Docs", "Docs", "{33333333-3333-3333-3333-333333333333}"
EndProject
"#;

const CORE_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="LoggingLib" Version="2.1.0" />
  </ItemGroup>
</Project>"#;

const WEB_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <ItemGroup>
    <ProjectReference Include="..\Core\Core.csproj" />
  </ItemGroup>
</Project>"#;

const ORDERS: &str = r#"
using System.Collections.Generic;

namespace Shop.Core
{
    public interface IOrderService
    {
        Order Find(int id);
    }

    public readonly struct Money
    {
        public decimal Amount { get; }
    }

    public class Customer
    {
        public string Name { get; set; }
    }

    public sealed class Order
    {
        private readonly Money _total;
        public Customer Buyer { get; set; }
        public List<OrderLine> Lines { get; } = new();

        public class OrderLine
        {
            public int Quantity { get; init; }
        }
    }

    public class OrderService : ServiceBase, IOrderService
    {
        public Order Find(int id) => null;
    }

    public abstract class ServiceBase
    {
        protected abstract void Reset();
    }
}
"#;

const CONTROLLER: &str = r#"
namespace Shop.Web;

public class OrdersController<TModel> where TModel : class, new()
{
    private IOrderService _service;

    public async Task<TModel> GetAsync(int id) => default;
}
"#;

fn solution() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Shop.sln", SOLUTION);
    write(dir.path(), "src/Core/Core.csproj", CORE_PROJECT);
    write(dir.path(), "src/Core/Orders.cs", ORDERS);
    write(dir.path(), "src/Core/obj/Generated.cs", "public class Generated { }");
    write(dir.path(), "src/Web/Web.csproj", WEB_PROJECT);
    write(dir.path(), "src/Web/OrdersController.cs", CONTROLLER);
    dir
}

// =============================================================================
// Project graph
// =============================================================================

#[test]
fn test_solution_projects_and_references() {
    let dir = solution();
    let diagram = render_solution(&dir.path().join("Shop.sln")).unwrap();

    assert!(diagram.contains("component [Core]"));
    assert!(diagram.contains("component [Web]"));
    assert!(!diagram.contains("[Docs]"));
    assert!(diagram.contains("    - LoggingLib\n"));
    assert!(diagram.contains("[Web] --> [Core]"));
}

#[test]
fn test_build_output_directories_are_ignored() {
    let dir = solution();
    let diagram = render_solution(&dir.path().join("Shop.sln")).unwrap();
    assert!(!diagram.contains("Generated"));
}

// =============================================================================
// Classes
// =============================================================================

#[test]
fn test_relationships_across_files() {
    let dir = solution();
    let diagram = render_solution(&dir.path().join("Shop.sln")).unwrap();

    assert!(diagram.contains("namespace Shop.Core {"));
    assert!(diagram.contains("class Order <<sealed>> {"));
    assert!(diagram.contains("Money --* Order"));
    assert!(diagram.contains("Customer --o Order"));
    assert!(diagram.contains("string --* Customer"));
    assert!(diagram.contains("Order +-- OrderLine"));
    assert!(diagram.contains("+ Quantity : int { get init }"));
}

#[test]
fn test_base_class_and_interface() {
    let dir = solution();
    let diagram = render_solution(&dir.path().join("Shop.sln")).unwrap();

    assert!(diagram.contains("ServiceBase <|-- OrderService"));
    assert!(diagram.contains("OrderService --|> IOrderService"));
    assert!(diagram.contains("class ServiceBase <<abstract>> {"));
    assert!(diagram.contains("# abstract Reset() : void"));
}

#[test]
fn test_generic_class_and_file_scoped_namespace() {
    let dir = solution();
    let diagram = render_solution(&dir.path().join("Shop.sln")).unwrap();

    assert!(diagram.contains("namespace Shop.Web {"));
    assert!(diagram.contains("class OrdersController<TModel: class & new()> {"));
    assert!(diagram.contains("+ async GetAsync(id: int) : Task<TModel>"));
    assert!(diagram.contains("IOrderService --o OrdersController"));
}

#[test]
fn test_interfaces_and_structs_are_not_classes() {
    let dir = solution();
    let diagram = render_solution(&dir.path().join("Shop.sln")).unwrap();
    assert!(!diagram.contains("class IOrderService"));
    assert!(!diagram.contains("class Money"));
}

#[test]
fn test_extractor_respects_cancellation() {
    let dir = solution();
    let project = SolutionReader::new()
        .open_project(&dir.path().join("src/Core/Core.csproj"))
        .unwrap();
    assert_eq!(project.source_files.len(), 1);

    let token = CancellationToken::new();
    let classes = CSharpExtractor::new().extract_classes(&project, &token).unwrap();
    assert_eq!(classes.len(), 4);

    token.cancel();
    let classes = CSharpExtractor::new().extract_classes(&project, &token).unwrap();
    assert!(classes.is_empty());
}
