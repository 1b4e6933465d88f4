use camodel::prelude::*;
use serde_json::{json, Value};

use crate::prelude::*;

const BEAM: &str = "IfcStructuralCurveMember|A1";
const COLUMN: &str = "IfcStructuralCurveMember|C7";
const SLAB: &str = "IfcStructuralSurfaceMember|S2";
const NODE_A: &str = "IfcStructuralPointConnection|PA";
const NODE_B: &str = "IfcStructuralPointConnection|PB";
const EDGE: &str = "IfcStructuralCurveConnection|E1";

fn real(x: f64) -> String {
  let mut s = String::new();
  fmt_real(&mut s, x).unwrap();
  return s;
}

fn identity() -> Value {
  return json!([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
}

fn fixed() -> Value {
  return json!({
    "dx": true, "dy": true, "dz": true,
    "drx": true, "dry": true, "drz": true
  });
}

/// A beam from A to B, eccentric at A, plus a column at A when asked to.
fn frame(with_column: bool) -> ConnectionGraph {
  let mut elements = vec![json!({
    "ifcName": BEAM, "geometryType": "line", "orientation": identity(),
    "connections": [
      {
        "relatedConnection": NODE_A,
        "eccentricity": true,
        "appliedCondition": { "dx": true, "dy": true, "dz": true }
      },
      { "relatedConnection": NODE_B, "appliedCondition": { "drz": 1500.0 } }
    ]
  })];
  if with_column {
    elements.push(json!({
      "ifcName": COLUMN, "geometryType": "line", "orientation": identity(),
      "connections": [{ "relatedConnection": NODE_A, "eccentricity": true }]
    }));
  }
  let model = json!({
    "elements": elements,
    "connections": [
      {
        "ifcName": NODE_A, "geometryType": "point", "orientation": identity(),
        "appliedCondition": fixed()
      },
      { "ifcName": NODE_B, "geometryType": "point", "orientation": identity() }
    ],
    "db": {
      "materials": [{
        "name": "S355",
        "mechProps": { "youngModulus": 2.1e11, "poissonRatio": 0.3 },
        "commonProps": { "massDensity": 7850.0 },
        "relatedElements": [BEAM, COLUMN]
      }],
      "profiles": [{
        "profileShape": "rectangular", "profileType": "AREA",
        "xDim": 0.2, "yDim": 0.4,
        "relatedElements": [BEAM, COLUMN]
      }]
    }
  });
  return ConnectionGraph::from_json_str(&model.to_string()).unwrap();
}

#[test]
fn test_fmt_real() {
  assert_eq!(real(0.0), "0.0");
  assert_eq!(real(-0.0), "-0.0");
  assert_eq!(real(1.0), "1.0");
  assert_eq!(real(-1.0), "-1.0");
  assert_eq!(real(9.806), "9.806");
  assert_eq!(real(2.1e11), "210000000000.0");
  assert_eq!(real(1e15), "1000000000000000.0");
  assert_eq!(real(1e16), "1e+16");
  assert_eq!(real(-2.5e20), "-2.5e+20");
  assert_eq!(real(0.0001), "0.0001");
  assert_eq!(real(1e-5), "1e-05");
  assert_eq!(real(1.5e-7), "1.5e-07");
  assert_eq!(real(0.1 + 0.2), "0.30000000000000004");
  assert_eq!(real(1e-100), "1e-100");
  assert_eq!(real(f64::NAN), "nan");
  assert_eq!(real(f64::NEG_INFINITY), "-inf");
}

#[test]
fn test_literals() {
  assert_eq!(PyLiteral::from("NON").to_string(), "'NON'");
  assert_eq!(PyLiteral::from("it's").to_string(), "\"it's\"");
  assert_eq!(PyLiteral::from(20_usize).to_string(), "20");
  assert_eq!(PyLiteral::tuple(["DEPL"]).to_string(), "('DEPL',)");
  assert_eq!(PyLiteral::tuple(Vec::<f64>::new()).to_string(), "()");
  assert_eq!(PyLiteral::tuple([1.0, -0.5]).to_string(), "(1.0, -0.5)");
  assert_eq!(PyLiteral::tuple([DOF_DX, DOF_DRZ]).to_string(), "('DX', 'DRZ')");
  let nested = PyLiteral::Tuple(vec![
    PyLiteral::from(1_i64),
    PyLiteral::tuple(["a"])
  ]);
  assert_eq!(nested.to_string(), "(1, ('a',))");
}

#[test]
fn test_command_shape() {
  let empty = Command::new("FIN", Vec::new());
  assert_eq!(empty.to_string(), "FIN()");
  let cmd = Command::bound("gravLoad", "AFFE_CHAR_MECA", vec![
    Keyword::result("MODELE", "model"),
    Keyword::fact("PESANTEUR", vec![
      Keyword::lit("GRAVITE", 9.806),
      Keyword::tuple("DIRECTION", [0.0, 0.0, -1.0])
    ]),
    Keyword::facts("EXCIT", vec![vec![Keyword::result("CHARGE", "liaisons")]])
  ]);
  let expected = "\
gravLoad = AFFE_CHAR_MECA(
    MODELE = model,
    PESANTEUR = _F(
        GRAVITE = 9.806,
        DIRECTION = (0.0, 0.0, -1.0)
    ),
    EXCIT = (
        _F(
            CHARGE = liaisons
        ),
    )
)";
  assert_eq!(cmd.to_string(), expected);
  assert!(cmd.keyword("PESANTEUR").is_some());
  assert!(cmd.keyword("CHARGE").is_none());
  let none = Command::new("X", vec![Keyword::facts("AFFE", Vec::new())]);
  assert_eq!(none.to_string(), "X(\n    AFFE = (\n    )\n)");
}

#[test]
fn test_settings() {
  let defaults = DeckSettings::default();
  assert_eq!(defaults.gravity, STANDARD_GRAVITY);
  assert_eq!(defaults.gravity_direction, [0.0, 0.0, -1.0]);
  let partial = DeckSettings::from_toml_str("gravity = 9.81\nresult_unit = 81")
    .unwrap();
  assert_eq!(partial.gravity, 9.81);
  assert_eq!(partial.result_unit, 81);
  assert_eq!(partial.mesh_unit, defaults.mesh_unit);
  assert_eq!(partial.rigid_link_section, [1.0, 1.0]);
  let bad = DeckSettings::from_toml_str("gravity = \"down\"");
  assert!(matches!(bad, Err(SettingsError::Toml(_))));
  let missing = DeckSettings::from_file("/nonexistent/settings.toml");
  assert!(matches!(missing, Err(SettingsError::Io(_))));
}

#[test]
fn test_step_order() {
  let graph = frame(false);
  let deck = CommandFile::assemble(&graph, &DeckSettings::default());
  let steps: Vec<DeckStep> = deck.sections.iter().map(|s| s.step).collect();
  assert_eq!(steps, DeckStep::all().to_vec());
  let text = deck.render();
  let mut last = 0;
  for needle in [
    "DEBUT(", "LIRE_MAILLAGE(", "AFFE_MODELE(", "DEFI_MATERIAU(",
    "AFFE_MATERIAU(", "AFFE_CARA_ELEM(", "POUTRE = (", "COQUE = (",
    "DISCRET = (", "ORIENTATION = (", "liaisons = AFFE_CHAR_MECA(",
    "LIAISON_DDL = (", "LIAISON_GROUP = (", "LIAISON_SOLIDE = (",
    "gravLoad = AFFE_CHAR_MECA(", "MECA_STATIQUE(", "IMPR_RESU(", "FIN()"
  ] {
    let at = text.find(needle).unwrap_or_else(|| panic!("missing {}", needle));
    assert!(at >= last, "{} is out of order", needle);
    last = at;
  }
  assert!(text.starts_with("# Command file generated by model2comm\n\n#"));
  assert!(text.ends_with("# STEP: CONCLUDE STUDY\nFIN()\n"));
  // same input, same bytes
  assert_eq!(text, render_deck(&graph, &DeckSettings::default()));
}

#[test]
fn test_single_eccentric_deck() {
  let text = render_deck(&frame(false), &DeckSettings::default());
  assert!(!text.contains("LIAISON_UNIF"));
  assert!(text.contains("LIAISON_SOLIDE = (\n        _F(\n            \
    GROUP_MA = 'ISCM_A1_1DR_ISPC_PA'\n        ),\n    )"));
  // ground restraint at A, then the three rigid axes of the relation
  assert!(text.contains("GROUP_NO = ('ISPC_PA', 'ISPC_PA', 'ISPC_PA'),\n"));
  assert!(text.contains(
    "GROUP_NO = ('ISCM_A1_0DC_ISPC_PA', 'ISCM_A1_0DC_ISPC_PA', \
    'ISCM_A1_0DC_ISPC_PA', 'ISPC_PA_0DC_ISCM_A1', 'ISPC_PA_0DC_ISCM_A1', \
    'ISPC_PA_0DC_ISCM_A1'),\n"
  ));
  assert!(text.contains("COEF_MULT = (1.0, 0.0, 0.0, -1.0, -0.0, -0.0),\n"));
  assert_eq!(text.matches("DDL = ('DX', 'DY', 'DZ', 'DX', 'DY', 'DZ')").count(), 3);
  // the B relation is purely elastic
  assert!(!text.contains("'ISCM_A1_0DC_ISPC_PB'"));
  assert!(text.contains(
    "GROUP_MA = 'ISCM_A1_1DS_ISPC_PB',\n            CARA = 'K_TR_D_L',\n            \
    VALE = (0.0, 0.0, 0.0, 0.0, 0.0, 1500.0),"
  ));
  assert!(text.contains("E = 210000000000.0,\n        NU = 0.3,"));
  assert!(text.contains("VALE = (0.2, 0.4)"));
  assert!(text.contains(
    "GROUP_MA = ('ISCM_A1_1DR_ISPC_PA',),\n            MATER = mat_0"
  ));
}

#[test]
fn test_unified_deck() {
  let graph = frame(true);
  let deck = CommandFile::assemble(&graph, &DeckSettings::default());
  let text = deck.render();
  assert!(text.contains(
    "LIAISON_UNIF = (\n        _F(\n            \
    GROUP_NO = ('ISPC_PA', 'ISPC_PA_0DC_1', 'ISPC_PA_0DC_2'),\n            \
    DDL = ('DX', 'DY', 'DZ', 'DRX', 'DRY', 'DRZ')\n        ),\n    )"
  ));
  let liaisons = deck.command("AFFE_CHAR_MECA").unwrap();
  assert!(liaisons.keyword("LIAISON_UNIF").is_some());
  assert!(liaisons.keyword("LIAISON_SOLIDE").is_some());
  let model = deck.command("AFFE_MODELE").unwrap();
  match &model.keyword("AFFE").unwrap().arg {
    Arg::Facts(facts) => {
      // 3D, beams, point nodes with springs, rigid links
      assert_eq!(facts.len(), 4);
      let nodes = &facts[2][0];
      assert_eq!(
        nodes.arg,
        Arg::Literal(PyLiteral::tuple([
          "ISPC_PA_0D", "ISPC_PB_0D", "ISCM_A1_1DS_ISPC_PA",
          "ISCM_A1_1DS_ISPC_PB", "ISCM_C7_1DS_ISPC_PA"
        ].map(|s| GroupName::from(s.to_owned()))))
      );
    },
    other => panic!("expected factors, got {:?}", other)
  }
}

#[test]
fn test_line_connections_and_shells() {
  let model = json!({
    "elements": [{
      "ifcName": SLAB, "geometryType": "surface", "thickness": 0.25,
      "orientation": [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
      "connections": [{
        "relatedConnection": EDGE,
        "appliedCondition": { "dz": true, "drx": 2e-5 }
      }]
    }],
    "connections": [{
      "ifcName": EDGE, "geometryType": "line", "orientation": identity(),
      "appliedCondition": { "dx": true }
    }]
  });
  let graph = ConnectionGraph::from_json_str(&model.to_string()).unwrap();
  let text = render_deck(&graph, &DeckSettings::default());
  // ground restraint: the group tied to itself at zero weight
  assert!(text.contains(
    "GROUP_NO_1 = ('ISCC_E1',),\n            GROUP_NO_2 = ('ISCC_E1',),\n            \
    DDL_1 = ('DX', 'DY', 'DZ'),\n            DDL_2 = ('DX', 'DY', 'DZ'),\n            \
    COEF_MULT_1 = (1.0, 0.0, 0.0),\n            COEF_MULT_2 = (0.0, 0.0, 0.0),"
  ));
  assert!(text.contains(
    "GROUP_NO_1 = ('ISSM_S2_1DC_ISCC_E1',),\n            \
    GROUP_NO_2 = ('ISCC_E1',),"
  ));
  assert!(text.contains("COEF_MULT_2 = (-0.0, -0.0, -1.0),"));
  assert!(text.contains("EPAIS = 0.25,\n            VECTEUR = (0.0, 1.0, 0.0)"));
  assert!(text.contains("CARA = 'VECT_X_Y',\n            VALE = (1.0, 0.0, 0.0, 0.0, 1.0, 0.0)"));
  assert!(text.contains("MODELISATION = 'DKT'"));
  assert!(!text.contains("LIAISON_SOLIDE"));
  assert!(!text.contains("K_TR_D_L"));
}

#[test]
fn test_settings_reach_the_deck() {
  let settings = DeckSettings::from_toml_str(
    "gravity = 10.0\nmesh_unit = 21\nrigid_link_section = [0.5, 0.5]"
  ).unwrap();
  let text = render_deck(&frame(false), &settings);
  assert!(text.contains("GRAVITE = 10.0,"));
  assert!(text.contains("UNITE = 21\n"));
  assert!(text.contains("VALE = (0.5, 0.5)"));
}
