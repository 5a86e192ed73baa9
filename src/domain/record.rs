// ==========================================
// 商业表格处理系统 - 处理后记录模型
// ==========================================
// 职责: 每种工作表一个强类型记录，按已解析的列索引逐字段构造
// 说明: 非必需列保留在 extra 中，输出时按表头顺序回写
// ==========================================

use crate::domain::grid::WorksheetGrid;
use crate::domain::types::CellValue;
use serde::Serialize;
use std::fmt::Debug;

// ==========================================
// 字段与记录的通用接口
// ==========================================

/// 工作表的必需字段（与必需列清单一一对应）
pub trait SheetField: Copy + Eq + Debug + 'static {
    /// 按必需列清单顺序排列
    const ALL: &'static [Self];

    fn column_name(self) -> &'static str;
}

/// 输出表头中某一列的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSlot<F> {
    Field(F),
    /// 非必需列，值位于 record.extra[i]
    Extra(usize),
}

pub trait SheetRecord {
    type Field: SheetField;

    fn field(&self, field: Self::Field) -> &CellValue;

    fn extra(&self) -> &[CellValue];

    /// 按列布局输出一行
    fn to_row(&self, slots: &[ColumnSlot<Self::Field>]) -> Vec<CellValue> {
        slots
            .iter()
            .map(|slot| match slot {
                ColumnSlot::Field(f) => self.field(*f).clone(),
                ColumnSlot::Extra(i) => self.extra().get(*i).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

// ==========================================
// ProcessedSheet - 单个工作表的处理结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedSheet<R: SheetRecord> {
    pub headers: Vec<String>,
    #[serde(skip)]
    pub slots: Vec<ColumnSlot<R::Field>>,
    pub records: Vec<R>,
}

impl<R: SheetRecord> ProcessedSheet<R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 表头 + 数据行，供编解码器写出
    pub fn to_grid(&self) -> WorksheetGrid {
        let mut rows = Vec::with_capacity(self.records.len() + 1);
        rows.push(self.headers.iter().map(|h| CellValue::text(h.as_str())).collect());
        rows.extend(self.records.iter().map(|r| r.to_row(&self.slots)));
        WorksheetGrid::new(rows)
    }
}

// ==========================================
// DISTRIBUIDOR
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistribuidorField {
    Codigo,
    Nombre,
    Cuit,
    Telefono,
    Email,
    CondicionIva,
    PersonaContacto,
}

impl SheetField for DistribuidorField {
    const ALL: &'static [Self] = &[
        Self::Codigo,
        Self::Nombre,
        Self::Cuit,
        Self::Telefono,
        Self::Email,
        Self::CondicionIva,
        Self::PersonaContacto,
    ];

    fn column_name(self) -> &'static str {
        match self {
            Self::Codigo => "Codigo",
            Self::Nombre => "Nombre",
            Self::Cuit => "CUIT",
            Self::Telefono => "Telefono",
            Self::Email => "Email",
            Self::CondicionIva => "Condicion Iva",
            Self::PersonaContacto => "Persona Contacto",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistribuidorRecord {
    pub codigo: CellValue,
    pub nombre: CellValue,
    pub cuit: CellValue,
    pub telefono: CellValue,
    pub email: CellValue,
    pub condicion_iva: CellValue,
    pub persona_contacto: CellValue,
    pub extra: Vec<CellValue>,
}

impl SheetRecord for DistribuidorRecord {
    type Field = DistribuidorField;

    fn field(&self, field: DistribuidorField) -> &CellValue {
        match field {
            DistribuidorField::Codigo => &self.codigo,
            DistribuidorField::Nombre => &self.nombre,
            DistribuidorField::Cuit => &self.cuit,
            DistribuidorField::Telefono => &self.telefono,
            DistribuidorField::Email => &self.email,
            DistribuidorField::CondicionIva => &self.condicion_iva,
            DistribuidorField::PersonaContacto => &self.persona_contacto,
        }
    }

    fn extra(&self) -> &[CellValue] {
        &self.extra
    }
}

// ==========================================
// LISTA DE PRECIOS
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListaPreciosField {
    Codigo,
    Nombre,
}

impl SheetField for ListaPreciosField {
    const ALL: &'static [Self] = &[Self::Codigo, Self::Nombre];

    fn column_name(self) -> &'static str {
        match self {
            Self::Codigo => "Codigo",
            Self::Nombre => "Nombre",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListaPreciosRecord {
    pub codigo: CellValue,
    pub nombre: CellValue,
    pub extra: Vec<CellValue>,
}

impl SheetRecord for ListaPreciosRecord {
    type Field = ListaPreciosField;

    fn field(&self, field: ListaPreciosField) -> &CellValue {
        match field {
            ListaPreciosField::Codigo => &self.codigo,
            ListaPreciosField::Nombre => &self.nombre,
        }
    }

    fn extra(&self) -> &[CellValue] {
        &self.extra
    }
}

// ==========================================
// LISTA DE PRECIOS TRADICIONAL
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListaTradicionalField {
    CodigoLista,
    CodigoProducto,
    NombreProducto,
    Marca,
    Categoria,
    PrecioSinIva,
    PorcentajeIva,
    PrecioConIva,
}

impl SheetField for ListaTradicionalField {
    const ALL: &'static [Self] = &[
        Self::CodigoLista,
        Self::CodigoProducto,
        Self::NombreProducto,
        Self::Marca,
        Self::Categoria,
        Self::PrecioSinIva,
        Self::PorcentajeIva,
        Self::PrecioConIva,
    ];

    fn column_name(self) -> &'static str {
        match self {
            Self::CodigoLista => "Codigo de Lista",
            Self::CodigoProducto => "Codigo Producto Bimbo",
            Self::NombreProducto => "Nombre del Producto",
            Self::Marca => "Marca",
            Self::Categoria => "Categoria del producto",
            Self::PrecioSinIva => "Precio Sin IVA",
            Self::PorcentajeIva => "% IVA",
            Self::PrecioConIva => "Precio con IVA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListaTradicionalRecord {
    pub codigo_lista: CellValue,
    pub codigo_producto: CellValue,
    pub nombre_producto: CellValue,
    pub marca: CellValue,
    pub categoria: CellValue,
    pub precio_sin_iva: CellValue,
    pub porcentaje_iva: CellValue,
    pub precio_con_iva: CellValue,
    pub extra: Vec<CellValue>,
}

impl SheetRecord for ListaTradicionalRecord {
    type Field = ListaTradicionalField;

    fn field(&self, field: ListaTradicionalField) -> &CellValue {
        match field {
            ListaTradicionalField::CodigoLista => &self.codigo_lista,
            ListaTradicionalField::CodigoProducto => &self.codigo_producto,
            ListaTradicionalField::NombreProducto => &self.nombre_producto,
            ListaTradicionalField::Marca => &self.marca,
            ListaTradicionalField::Categoria => &self.categoria,
            ListaTradicionalField::PrecioSinIva => &self.precio_sin_iva,
            ListaTradicionalField::PorcentajeIva => &self.porcentaje_iva,
            ListaTradicionalField::PrecioConIva => &self.precio_con_iva,
        }
    }

    fn extra(&self) -> &[CellValue] {
        &self.extra
    }
}

// ==========================================
// CLIENTES
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientesField {
    Codigo,
    Nombre,
    Direccion,
    Telefono,
    Email,
    Cuit,
    CondicionIva,
    PersonaContacto,
    CodigoListaPrecios,
    VisitaLunes,
    VisitaMartes,
    VisitaMiercoles,
    VisitaJueves,
    VisitaViernes,
    VisitaSabado,
    VisitaDomingo,
}

impl ClientesField {
    pub const VISITAS: [ClientesField; 7] = [
        Self::VisitaLunes,
        Self::VisitaMartes,
        Self::VisitaMiercoles,
        Self::VisitaJueves,
        Self::VisitaViernes,
        Self::VisitaSabado,
        Self::VisitaDomingo,
    ];

    /// 对应 visitas 数组下标（非 visita 字段返回 None）
    pub fn visita_index(self) -> Option<usize> {
        Self::VISITAS.iter().position(|v| *v == self)
    }
}

impl SheetField for ClientesField {
    const ALL: &'static [Self] = &[
        Self::Codigo,
        Self::Nombre,
        Self::Direccion,
        Self::Telefono,
        Self::Email,
        Self::Cuit,
        Self::CondicionIva,
        Self::PersonaContacto,
        Self::CodigoListaPrecios,
        Self::VisitaLunes,
        Self::VisitaMartes,
        Self::VisitaMiercoles,
        Self::VisitaJueves,
        Self::VisitaViernes,
        Self::VisitaSabado,
        Self::VisitaDomingo,
    ];

    fn column_name(self) -> &'static str {
        match self {
            Self::Codigo => "Codigo",
            Self::Nombre => "Nombre",
            Self::Direccion => "Direccion",
            Self::Telefono => "Telefono",
            Self::Email => "Email",
            Self::Cuit => "CUIT",
            Self::CondicionIva => "Condicion Iva",
            Self::PersonaContacto => "Persona Contacto",
            Self::CodigoListaPrecios => "Codigo Lista precios",
            Self::VisitaLunes => "Visita Lunes",
            Self::VisitaMartes => "Visita Martes",
            Self::VisitaMiercoles => "Visita Miercoles",
            Self::VisitaJueves => "Visita Jueves",
            Self::VisitaViernes => "Visita Viernes",
            Self::VisitaSabado => "Visita Sabado",
            Self::VisitaDomingo => "Visita Domingo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientesRecord {
    pub codigo: CellValue,
    pub nombre: CellValue,
    pub direccion: CellValue,
    pub telefono: CellValue,
    pub email: CellValue,
    pub cuit: CellValue,
    pub condicion_iva: CellValue,
    pub persona_contacto: CellValue,
    pub codigo_lista_precios: CellValue,
    /// 周一 .. 周日
    pub visitas: [CellValue; 7],
    pub extra: Vec<CellValue>,
}

impl SheetRecord for ClientesRecord {
    type Field = ClientesField;

    fn field(&self, field: ClientesField) -> &CellValue {
        match field {
            ClientesField::Codigo => &self.codigo,
            ClientesField::Nombre => &self.nombre,
            ClientesField::Direccion => &self.direccion,
            ClientesField::Telefono => &self.telefono,
            ClientesField::Email => &self.email,
            ClientesField::Cuit => &self.cuit,
            ClientesField::CondicionIva => &self.condicion_iva,
            ClientesField::PersonaContacto => &self.persona_contacto,
            ClientesField::CodigoListaPrecios => &self.codigo_lista_precios,
            visita => {
                let idx = visita.visita_index().unwrap_or(0);
                &self.visitas[idx]
            }
        }
    }

    fn extra(&self) -> &[CellValue] {
        &self.extra
    }
}
