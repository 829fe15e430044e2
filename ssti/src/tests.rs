use std::path::Path;

use super::*;
use crate::utils::SerializationFormat::{Json, Toml, Yaml};

/// Traffic-light controller ports, as declared for a numeric-width front end
fn traffic_light_ports() -> Vec<PortDecl> {
    vec![
        PortDecl::new("1", "load", "input"),
        PortDecl::new("1", "start_green", "input"),
        PortDecl::new("6", "green_time", "input"),
        PortDecl::new("2", "yellow_time", "input"),
        PortDecl::new("6", "red_time", "input"),
        PortDecl::new("2", "state", "output"),
    ]
}
/// Data and clock formats recording each port's position
fn pos_formats() -> LineFormats {
    LineFormats::new("{sig}[{sp}:{sl}]", "{sig}@{sp}")
}
/// Binding with positional formats and numeric widths
fn pos_binding(splice: bool) -> FormatBinding {
    FormatBinding {
        splice,
        input_format: "{sig}[{sp}:{sl}]".into(),
        output_format: "{sig}[{sp}:{sl}]".into(),
        clock_format: "{sig}@{sp}".into(),
        ..Default::default()
    }
}
/// Black box pointing at the resource-directory templates
fn bbox(ipc: &str) -> BlackBox {
    BlackBox {
        module: "traffic_light_fsm".into(),
        lib: "intersection".into(),
        ipc: ipc.into(),
        driver_template: resource("driver.py").into(),
        component_template: resource("comp.hpp").into(),
        desc: "Traffic Light FSM".into(),
        ..Default::default()
    }
}

#[test]
fn it_classifies_ports() -> BboxResult<()> {
    let decls = vec![
        PortDecl::new("2", "state", "output"),
        PortDecl::new("<bool>//1", "clock", "clock"),
        PortDecl::new("1", "load", "input"),
        PortDecl::new("8", "bus", "inout"),
        PortDecl::new("6", "green_time", "input"),
    ];
    let ports = PortList::classify(&decls)?;
    assert_eq!(ports.len(), 5);
    assert!(!ports.is_empty());

    // Priority order, with declaration order kept within each group
    let names: Vec<&str> = ports.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["clock", "load", "green_time", "state", "bus"]);
    assert_eq!(ports.group(PortCategory::Input), ports.inputs());
    assert_eq!(ports.inouts()[0].category, PortCategory::Inout);

    // Width suffixes are dropped for display, and kept for clock widths
    let clock = &ports.clocks()[0];
    assert_eq!(clock.display_type(), "<bool>");
    assert_eq!(clock.declared_type, "<bool>//1");
    assert_eq!(clock.suffix_width()?, 1);
    Ok(())
}
#[test]
fn it_rejects_unknown_categories() {
    let decls = vec![
        PortDecl::new("1", "load", "input"),
        PortDecl::new("1", "data", "bidir"),
    ];
    match PortList::classify(&decls) {
        Err(BboxError::PortType { name, category }) => {
            assert_eq!(name, "data");
            assert_eq!(category, "bidir");
        }
        other => panic!("Expected a PortType error, got {:?}", other),
    }
}
#[test]
fn it_parses_widths() -> BboxResult<()> {
    assert_eq!(NumericWidth.width_of("6")?, 6);
    assert_eq!(NumericWidth.width_of("bits//3")?, 3);
    assert!(matches!(NumericWidth.width_of("abc"), Err(BboxError::Width { .. })));
    assert!(matches!(NumericWidth.width_of("0"), Err(BboxError::Width { .. })));

    assert_eq!(BracketWidth.width_of("<bool>")?, 1);
    assert_eq!(BracketWidth.width_of("<sc_uint<6>>")?, 6);
    assert_eq!(BracketWidth.width_of("<sc_bv<12>>")?, 12);
    assert_eq!(BracketWidth.width_of("sc_uint<2>")?, 2);
    assert_eq!(BracketWidth.width_of("<sc_uint<6>>//8")?, 8);
    assert!(BracketWidth.width_of("<int>").is_err());

    // Closures are width parsers too
    let doubled = |t: &str| NumericWidth.width_of(t).map(|w| 2 * w);
    assert_eq!(doubled.width_of("3")?, 6);

    assert_eq!(WidthKind::Bracket.parser().width_of("<sc_uint<4>>")?, 4);
    assert_eq!(WidthKind::default(), WidthKind::Numeric);
    Ok(())
}
#[test]
fn it_allocates_contiguous_offsets() -> BboxResult<()> {
    let ports = PortList::classify(&traffic_light_ports())?;
    let opts = LayoutOptions { start: 3, splice: false };
    let layout = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &pos_formats())?;

    let mut expected = 3;
    for entry in layout.entries.iter() {
        assert_eq!(entry.offset, expected);
        expected += entry.width;
    }
    let widths: Vec<usize> = layout.entries.iter().map(|e| e.width).collect();
    assert_eq!(widths, vec![1, 1, 6, 2, 6]);
    assert_eq!(layout.buf_size, 3 + 16);
    Ok(())
}
#[test]
fn it_sizes_the_traffic_light_buffer() -> BboxResult<()> {
    let ports = PortList::classify(&traffic_light_ports())?;
    let fmts = pos_formats();

    let opts = LayoutOptions { start: 0, splice: false };
    let layout = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &fmts)?;
    assert_eq!(layout.buf_size, 16);
    let lines: Vec<&str> = layout.text.split(LINE_SEP).collect();
    assert_eq!(
        lines,
        vec![
            "load[0:1]",
            "start_green[1:1]",
            "green_time[2:6]",
            "yellow_time[8:2]",
            "red_time[10:6]",
        ]
    );

    // Splice mode renders end positions, and reserves one trailing unit
    let opts = LayoutOptions { start: 0, splice: true };
    let layout = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &fmts)?;
    assert_eq!(layout.buf_size, 17);
    assert_eq!(
        layout.text,
        [
            "load[0:1]",
            "start_green[1:2]",
            "green_time[2:8]",
            "yellow_time[8:10]",
            "red_time[10:16]",
        ]
        .join(LINE_SEP)
    );
    Ok(())
}
#[test]
fn it_places_clocks_last() -> BboxResult<()> {
    let decls = vec![
        PortDecl::new("2", "clk_fast", "clock"),
        PortDecl::new("4", "a", "input"),
        PortDecl::new("1", "clk_slow", "clock"),
        PortDecl::new("3", "b", "input"),
    ];
    let ports = PortList::classify(&decls)?;
    let opts = LayoutOptions { start: 0, splice: false };
    let layout = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &pos_formats())?;

    assert_eq!(
        layout.text,
        ["a[0:4]", "b[4:3]", "clk_fast@7", "clk_slow@9"].join(LINE_SEP)
    );
    // Data widths, plus clock widths from their declared types
    assert_eq!(layout.buf_size, 4 + 3 + 2 + 1);

    let opts = LayoutOptions { start: 0, splice: true };
    let layout = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &pos_formats())?;
    assert_eq!(layout.buf_size, 11);
    Ok(())
}
#[test]
fn it_rejects_unsized_clocks() -> BboxResult<()> {
    let decls = vec![PortDecl::new("<bool>", "clock", "clock")];
    let ports = PortList::classify(&decls)?;
    let opts = LayoutOptions::default();
    let rv = allocate(ports.inputs(), ports.clocks(), &BracketWidth, opts, &pos_formats());
    assert!(matches!(rv, Err(BboxError::Width { .. })));
    Ok(())
}
#[test]
fn it_rejects_overflowing_widths() -> BboxResult<()> {
    let decls = vec![
        PortDecl::new("18446744073709551615", "huge", "input"),
        PortDecl::new("1", "b", "input"),
    ];
    let ports = PortList::classify(&decls)?;
    let opts = LayoutOptions { start: 0, splice: false };
    let rv = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &pos_formats());
    assert!(matches!(rv, Err(BboxError::Width { .. })));

    // A start offset at the top of the range leaves no room for even one bit
    let decls = vec![PortDecl::new("1", "a", "input")];
    let ports = PortList::classify(&decls)?;
    let opts = LayoutOptions { start: usize::MAX, splice: true };
    let rv = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &pos_formats());
    assert!(matches!(rv, Err(BboxError::Width { .. })));

    // Splice mode's trailing unit overflows on its own
    let opts = LayoutOptions { start: usize::MAX - 1, splice: true };
    let rv = allocate(ports.inputs(), ports.clocks(), &NumericWidth, opts, &pos_formats());
    assert!(matches!(rv, Err(BboxError::Str(_))));
    Ok(())
}
#[test]
fn it_rejects_zero_width_clocks() -> BboxResult<()> {
    let decls = vec![
        PortDecl::new("<bool>//0", "clk", "clock"),
        PortDecl::new("<bool>//1", "clk2", "clock"),
    ];
    let ports = PortList::classify(&decls)?;
    assert!(matches!(
        ports.clocks()[0].suffix_width(),
        Err(BboxError::Width { .. })
    ));
    assert_eq!(ports.clocks()[1].suffix_width()?, 1);
    let opts = LayoutOptions::default();
    let rv = allocate(ports.inputs(), ports.clocks(), &BracketWidth, opts, &pos_formats());
    assert!(matches!(rv, Err(BboxError::Width { .. })));
    Ok(())
}
#[test]
fn it_describes_links() {
    let links = link_descriptors("counter", None);
    assert_eq!(links[0].name, "counter_din");
    assert_eq!(links[0].description, "counter data in");
    assert_eq!(links[1].name, "counter_dout");
    assert_eq!(links[1].description, "counter data out");
    assert!(links.iter().all(|l| l.event_type == EVENT_TYPE));
    assert_eq!(
        render_link_descriptors(&links),
        concat!(
            "{ \"counter_din\", \"counter data in\", { \"sst.Interfaces.StringEvent\" }},\n",
            "        { \"counter_dout\", \"counter data out\", { \"sst.Interfaces.StringEvent\" }}",
        )
    );

    let overrides = LinkDescriptions {
        din: Some("Counter input".into()),
        dout: None,
    };
    let links = link_descriptors("counter", Some(&overrides));
    assert_eq!(links[0].description, "Counter input");
    assert_eq!(links[1].description, "counter data out");
}
#[test]
fn it_substitutes_every_key() -> BboxResult<()> {
    let ctx: TemplateContext = Artifact::Component
        .required_keys()
        .iter()
        .map(|k| (*k, format!("<{}>", k.to_uppercase())))
        .collect();
    let src: String = Artifact::Component
        .required_keys()
        .iter()
        .map(|k| format!("{} = {{{}}};\n", k, k))
        .collect();

    let rendered = Template::parse(Artifact::Component, &src)?.render(&ctx)?;
    for key in Artifact::Component.required_keys() {
        let line = format!("{} = <{}>;", key, key.to_uppercase());
        assert!(rendered.contains(&line), "missing {:?}", line);
    }
    assert!(!rendered.contains('{'));
    assert!(!rendered.contains('}'));
    Ok(())
}
#[test]
fn it_keeps_escaped_braces() -> BboxResult<()> {
    let tmpl = Template::parse(Artifact::Driver, "class {name} {{ int x; }};")?;
    let ctx = TemplateContext::new().with("name", "counter");
    assert_eq!(tmpl.fill(&ctx)?, "class counter { int x; };");
    assert_eq!(tmpl.placeholders().collect::<Vec<_>>(), vec!["name"]);
    Ok(())
}
#[test]
fn it_reports_template_errors() -> BboxResult<()> {
    // Placeholder with no value
    let tmpl = Template::parse(Artifact::Driver, "{module} {missing}")?;
    let ctx = TemplateContext::new().with("module", "m");
    match tmpl.fill(&ctx) {
        Err(BboxError::Placeholder { artifact, key }) => {
            assert_eq!(artifact, Artifact::Driver);
            assert_eq!(key, "missing");
        }
        other => panic!("Expected a Placeholder error, got {:?}", other),
    }

    // Context missing a schema key, even if the template never uses it
    let tmpl = Template::parse(Artifact::Component, "{module}")?;
    let rv = tmpl.render(&ctx);
    assert!(matches!(rv, Err(BboxError::Placeholder { ref key, .. }) if key == "lib_dir"));

    // Malformed syntax
    let rv = Template::parse(Artifact::Driver, "line one\nint main() { }");
    assert!(matches!(rv, Err(BboxError::TemplateSyntax { line: 2, .. })));
    let rv = Template::parse(Artifact::Driver, "{unterminated");
    assert!(matches!(rv, Err(BboxError::TemplateSyntax { line: 1, .. })));
    let rv = Template::parse(Artifact::Driver, "}");
    assert!(matches!(rv, Err(BboxError::TemplateSyntax { .. })));
    let rv = Template::parse(Artifact::Driver, "{}");
    assert!(matches!(rv, Err(BboxError::TemplateSyntax { .. })));
    Ok(())
}
#[test]
fn it_renders_template_files() -> BboxResult<()> {
    let ctx: TemplateContext = Artifact::Component
        .required_keys()
        .iter()
        .map(|k| (*k, "x"))
        .collect();
    let rendered = template::render(Artifact::Component, resource("comp.hpp"), &ctx)?;
    assert!(rendered.contains("class x : public SST::Component {"));

    let rv = template::render(Artifact::Component, resource("nonexistent.hpp"), &ctx);
    match rv {
        Err(BboxError::TemplateNotFound { artifact, path }) => {
            assert_eq!(artifact, Artifact::Component);
            assert!(path.ends_with("nonexistent.hpp"));
        }
        other => panic!("Expected a TemplateNotFound error, got {:?}", other),
    }
    Ok(())
}
#[test]
fn it_validates_ipc_protocols() {
    assert_eq!(IpcProtocol::parse("sock").unwrap().sig_type(), "SocketSignal");
    assert_eq!(IpcProtocol::parse("zmq").unwrap().sig_type(), "ZMQSignal");
    assert!(matches!(
        IpcProtocol::parse("http"),
        Err(BboxError::Configuration(_))
    ));
    let rv = Generator::new(bbox("http"), pos_binding(false));
    assert!(matches!(rv, Err(BboxError::Configuration(_))));
}
#[test]
fn it_lays_out_both_directions() -> BboxResult<()> {
    let mut decls = traffic_light_ports();
    decls.push(PortDecl::new("3", "mode", "inout"));
    decls.push(PortDecl::new("1//1", "clock", "clock"));
    let ports = PortList::classify(&decls)?;
    let gen = Generator::new(bbox("sock"), pos_binding(false))?;
    let layouts = gen.layouts(&ports)?;

    // Inputs, then inouts, then clocks
    assert_eq!(layouts.inputs.buf_size, 16 + 3 + 1);
    assert!(layouts.inputs.text.ends_with("mode[16:3]\n        clock@19"));
    // Outputs, then inouts
    assert_eq!(layouts.outputs.text, ["state[0:2]", "mode[2:3]"].join(LINE_SEP));
    assert_eq!(layouts.outputs.buf_size, 5);
    assert_eq!(layouts.buf_size(), 20);

    let ctx = gen.component_context(&layouts);
    assert_eq!(ctx.get("buf_size"), Some("20"));
    assert_eq!(ctx.get("sig_type"), Some("SocketSignal"));
    assert_eq!(ctx.get("sender"), Some("m_signal_io"));
    for key in Artifact::Component.required_keys() {
        assert!(ctx.contains_key(key), "missing {}", key);
    }
    let ctx = gen.driver_context(&ports, &layouts)?;
    assert_eq!(ctx.get("ipc"), Some("sock"));
    for key in Artifact::Driver.required_keys() {
        assert!(ctx.contains_key(key), "missing {}", key);
    }
    Ok(())
}
#[test]
fn it_requires_ports() -> BboxResult<()> {
    let dir = tempfile::tempdir()?;
    let gen = Generator::new(bbox("sock"), pos_binding(false))?;
    let ports = PortList::default();
    let rv = gen.generate(&ports, dir.path());
    assert!(matches!(rv, Err(BboxError::PortsNotSet)));
    // Nothing was created
    assert!(!dir.path().join(BBOX_DIR).exists());
    Ok(())
}
#[test]
fn it_generates_the_traffic_light() -> BboxResult<()> {
    let dir = tempfile::tempdir()?;
    let manifest = BboxManifest::from_file(resource("traffic_light.yaml"))?;
    let ports = manifest.port_list()?;
    let gen = manifest.generator()?;

    // Generate twice; the second pass finds the directory already in place
    let first = gen.generate(&ports, dir.path())?;
    let emitted = gen.generate(&ports, dir.path())?;
    assert_eq!(first, emitted);

    let bbox_dir = dir.path().join(BBOX_DIR);
    assert_eq!(emitted.driver, bbox_dir.join("traffic_light_fsm_driver.py"));
    assert_eq!(emitted.component, bbox_dir.join("traffic_light_fsm_comp.hpp"));

    let comp = std::fs::read_to_string(&emitted.component)?;
    assert!(comp.contains("class traffic_light_fsm : public SST::Component {"));
    assert!(comp.contains("m_signal_io(17) {}"));
    assert!(comp.contains("SocketSignal m_signal_io;"));
    assert!(comp.contains("#include \"../../../../ssti/sstscit.hpp\""));
    assert!(comp.contains(
        "{ \"traffic_light_fsm_din\", \"Traffic Light FSM data_in\", { \"sst.Interfaces.StringEvent\" }}"
    ));
    assert!(comp.contains("\"Traffic Light FSM data_out\""));
    assert!(!comp.contains("{module}"));

    let driver = std::fs::read_to_string(&emitted.driver)?;
    assert!(driver.starts_with("\"\"\"Traffic Light FSM\"\"\""));
    assert!(driver.contains("from sst_sock import Signal"));
    assert!(driver.contains("m_signal_io = Signal(17)"));
    assert!(driver.contains("    # load: 1\n    # start_green: 1\n"));
    assert!(driver.contains("        load = int(signal[0:1])\n        start_green = int(signal[1:2])"));
    assert!(driver.contains("red_time = int(signal[10:16])"));
    assert!(driver.contains("str(output[\"state\"]).zfill(2 - 0),"));
    Ok(())
}
#[test]
fn it_generates_a_clocked_counter() -> BboxResult<()> {
    let dir = tempfile::tempdir()?;
    let manifest = BboxManifest::from_file(resource("counter.toml"))?;
    let ports = manifest.port_list()?;
    let gen = manifest.generator()?;
    assert_eq!(gen.ipc(), IpcProtocol::Zmq);

    let artifacts = gen.render(&ports)?;
    // Inputs from offset 2, then the trailing clock; output count is 4 bits from offset 2
    assert!(artifacts.driver.contains("reset = std::stoi(_data_in.substr(2, 1));"));
    assert!(artifacts.driver.contains("enable = std::stoi(_data_in.substr(3, 1));"));
    assert!(artifacts.driver.contains("clock = std::stoi(_data_in.substr(4, 1));"));
    assert!(artifacts.driver.contains("_data_out << std::setw(4) << count;"));
    assert!(artifacts.driver.contains("sc_signal<bool> clock;\n    sc_signal<bool> reset;"));
    assert!(artifacts.driver.contains("sc_start(1, SC_NS);"));
    assert!(artifacts.driver.contains("zmq_signal m_signal_io(std::stoi(argv[1]), 6);"));
    assert!(artifacts.component.contains("ZMQSignal m_signal_io;"));

    let emitted = gen.generate(&ports, dir.path())?;
    assert!(emitted.driver.ends_with("blackboxes/counter_driver.cpp"));
    assert_eq!(std::fs::read_to_string(&emitted.driver)?, artifacts.driver);
    assert_eq!(std::fs::read_to_string(&emitted.component)?, artifacts.component);
    Ok(())
}
#[test]
fn it_reports_missing_templates() -> BboxResult<()> {
    let dir = tempfile::tempdir()?;
    let ports = PortList::classify(&traffic_light_ports())?;

    let mut desc = bbox("sock");
    desc.component_template = dir.path().join("nonexistent.hpp");
    let gen = Generator::new(desc, pos_binding(false))?;
    match gen.generate(&ports, dir.path()) {
        Err(BboxError::TemplateNotFound { artifact, .. }) => {
            assert_eq!(artifact, Artifact::Component)
        }
        other => panic!("Expected a TemplateNotFound error, got {:?}", other),
    }

    let mut desc = bbox("sock");
    desc.driver_template = dir.path().join("nonexistent.py");
    let gen = Generator::new(desc, pos_binding(false))?;
    let rv = gen.generate(&ports, dir.path());
    assert!(matches!(
        rv,
        Err(BboxError::TemplateNotFound { artifact: Artifact::Driver, .. })
    ));
    Ok(())
}
#[test]
fn it_checks_placeholders_before_writing() -> BboxResult<()> {
    let dir = tempfile::tempdir()?;
    let tmpl = dir.path().join("driver.py");
    std::fs::write(&tmpl, "{inputs}\n{not_a_key}\n")?;

    let mut desc = bbox("sock");
    desc.driver_template = tmpl;
    let gen = Generator::new(desc, pos_binding(false))?;
    let ports = PortList::classify(&traffic_light_ports())?;
    let rv = gen.generate(&ports, dir.path());
    assert!(matches!(rv, Err(BboxError::Placeholder { ref key, .. }) if key == "not_a_key"));
    assert!(!dir.path().join(BBOX_DIR).exists());
    Ok(())
}
#[test]
fn it_rejects_module_paths() {
    for module in ["../x", "a/b", "a\\b", ".."] {
        let mut desc = bbox("sock");
        desc.module = module.into();
        let rv = Generator::new(desc, pos_binding(false));
        assert!(matches!(rv, Err(BboxError::Configuration(_))), "{}", module);
    }
}
#[test]
fn it_keeps_the_driver_when_the_component_write_fails() -> BboxResult<()> {
    let dir = tempfile::tempdir()?;
    let manifest = BboxManifest::from_file(resource("traffic_light.yaml"))?;
    let ports = manifest.port_list()?;
    let gen = manifest.generator()?;

    // A directory squatting on the component's path makes its write fail
    let dest = gen.destinations(dir.path());
    std::fs::create_dir_all(&dest.component)?;
    let rv = gen.generate(&ports, dir.path());
    assert!(rv.is_err());
    assert!(dest.driver.is_file());
    assert!(dest.component.is_dir());
    Ok(())
}
#[test]
fn it_round_trips_manifests() -> BboxResult<()> {
    let manifest = BboxManifest::from_file(resource("traffic_light.yaml"))?;
    assert_eq!(manifest.ports, traffic_light_ports());
    assert_eq!(manifest.binding.width, WidthKind::Numeric);
    assert!(manifest.binding.splice);
    assert_eq!(
        manifest.bbox.driver_template,
        Path::new(&resource("driver.py"))
    );

    for fmt in [Json, Yaml, Toml] {
        let s = fmt.to_string(&manifest)?;
        let back: BboxManifest = fmt.from_str(&s)?;
        assert_eq!(back, manifest);
    }
    Ok(())
}
#[test]
fn it_writes_the_manifest_schema() {
    let schema = schemars::schema_for!(BboxManifest);
    let json = serde_json::to_value(&schema).unwrap();
    let props = &json["properties"];
    for key in ["ports", "bbox", "binding"] {
        assert!(props.get(key).is_some(), "missing {}", key);
    }
    let required = json["required"].as_array().unwrap();
    assert!(required.iter().any(|r| r == "bbox"));
    assert!(!required.iter().any(|r| r == "ports"));
}

/// Helper function: Grab the full path of resource-file `fname`
fn resource(rname: &str) -> String {
    format!("{}/resources/{}", env!("CARGO_MANIFEST_DIR"), rname)
}
