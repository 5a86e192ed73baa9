// ==========================================
// 商业表格处理系统 - 必需列清单
// ==========================================
// 职责: 工作表种类 → 必需列名（有序）
// 红线: 加载期常量，不可由用户配置，运行期不修改
// ==========================================

use crate::domain::types::SheetKind;

pub const DISTRIBUIDOR_COLUMNS: &[&str] = &[
    "Codigo",
    "Nombre",
    "CUIT",
    "Telefono",
    "Email",
    "Condicion Iva",
    "Persona Contacto",
];

pub const LISTA_PRECIOS_COLUMNS: &[&str] = &["Codigo", "Nombre"];

pub const LISTA_PRECIOS_TRADICIONAL_COLUMNS: &[&str] = &[
    "Codigo de Lista",
    "Codigo Producto Bimbo",
    "Nombre del Producto",
    "Marca",
    "Categoria del producto",
    "Precio Sin IVA",
    "% IVA",
    "Precio con IVA",
];

pub const CLIENTES_COLUMNS: &[&str] = &[
    "Codigo",
    "Nombre",
    "Direccion",
    "Telefono",
    "Email",
    "CUIT",
    "Condicion Iva",
    "Persona Contacto",
    "Codigo Lista precios",
    "Visita Lunes",
    "Visita Martes",
    "Visita Miercoles",
    "Visita Jueves",
    "Visita Viernes",
    "Visita Sabado",
    "Visita Domingo",
];

// ==========================================
// RequiredColumnManifest
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredColumnManifest;

impl RequiredColumnManifest {
    pub fn required_columns(&self, kind: SheetKind) -> &'static [&'static str] {
        match kind {
            SheetKind::Distribuidor => DISTRIBUIDOR_COLUMNS,
            SheetKind::ListaPrecios => LISTA_PRECIOS_COLUMNS,
            SheetKind::ListaPreciosTradicional => LISTA_PRECIOS_TRADICIONAL_COLUMNS,
            SheetKind::Clientes => CLIENTES_COLUMNS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{
        ClientesField, DistribuidorField, ListaPreciosField, ListaTradicionalField, SheetField,
    };

    fn names<F: SheetField>() -> Vec<&'static str> {
        F::ALL.iter().map(|f| f.column_name()).collect()
    }

    #[test]
    fn test_manifest_matches_record_fields() {
        let manifest = RequiredColumnManifest;
        assert_eq!(
            manifest.required_columns(SheetKind::Distribuidor),
            names::<DistribuidorField>().as_slice()
        );
        assert_eq!(
            manifest.required_columns(SheetKind::ListaPrecios),
            names::<ListaPreciosField>().as_slice()
        );
        assert_eq!(
            manifest.required_columns(SheetKind::ListaPreciosTradicional),
            names::<ListaTradicionalField>().as_slice()
        );
        assert_eq!(
            manifest.required_columns(SheetKind::Clientes),
            names::<ClientesField>().as_slice()
        );
    }

    #[test]
    fn test_clientes_has_seven_visita_columns() {
        let visitas = CLIENTES_COLUMNS
            .iter()
            .filter(|c| c.starts_with("Visita"))
            .count();
        assert_eq!(visitas, 7);
    }
}
